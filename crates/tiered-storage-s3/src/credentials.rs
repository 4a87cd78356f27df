// crates/tiered-storage-s3/src/credentials.rs
// ============================================================================
// Module: S3 Credentials Providers
// Description: Credentials capability and the built-in providers.
// Purpose: Supply AWS credentials to the S3 backend through named providers.
// Dependencies: aws-config, aws-credential-types, aws-sdk-s3, tiered-storage-config, tokio
// ============================================================================

//! ## Overview
//! Operators pick a credentials provider by type name through the
//! `credentials.provider.class` key. Any type registered under
//! [`CredentialsCapability`] qualifies; the built-in ones live here and wrap
//! the AWS SDK's own providers.
//!
//! A provider hands the SDK a [`SharedCredentialsProvider`], so the client
//! asks for credentials on every signing and refreshes them as they expire.
//! Construction performs no I/O, so resolving a provider during configuration
//! validation never touches the environment, the filesystem or the network.
//!
//! Invariants:
//! - Secrets never appear in `Debug` output or log events.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::PathBuf;

use aws_config::default_provider::credentials::DefaultCredentialsChain;
use aws_config::environment::EnvironmentVariableCredentialsProvider;
use aws_config::profile::ProfileFileCredentialsProvider as SdkProfileFileProvider;
use aws_config::profile::profile_file::ProfileFileKind;
use aws_config::profile::profile_file::ProfileFiles;
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::provider::future;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::config::SharedCredentialsProvider;
use tiered_storage_config::Capability;
use tokio::sync::OnceCell;

// ============================================================================
// SECTION: Capability
// ============================================================================

/// Source of AWS credentials for the S3 backend.
pub trait CredentialsProvider: Send + Sync + fmt::Debug {
    /// Returns the SDK provider the client calls whenever it needs
    /// credentials.
    fn shared_provider(&self) -> SharedCredentialsProvider;

    /// Short name used in log events and credential metadata.
    fn name(&self) -> &'static str;
}

/// Capability marker for credentials providers.
#[derive(Debug, Clone, Copy)]
pub struct CredentialsCapability;

impl Capability for CredentialsCapability {
    type Instance = dyn CredentialsProvider;
    const NAME: &'static str = "tiered_storage_s3::credentials::CredentialsProvider";
}

// ============================================================================
// SECTION: Environment Provider
// ============================================================================

/// Reads `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and `AWS_SESSION_TOKEN`
/// each time credentials are requested.
#[derive(Debug, Clone)]
pub struct EnvironmentCredentialsProvider {
    /// SDK environment provider.
    inner: SharedCredentialsProvider,
}

impl EnvironmentCredentialsProvider {
    /// Creates a provider reading the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SharedCredentialsProvider::new(EnvironmentVariableCredentialsProvider::new()),
        }
    }
}

impl Default for EnvironmentCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialsProvider for EnvironmentCredentialsProvider {
    fn shared_provider(&self) -> SharedCredentialsProvider {
        self.inner.clone()
    }

    fn name(&self) -> &'static str {
        "Environment"
    }
}

// ============================================================================
// SECTION: Profile File Provider
// ============================================================================

/// Reads a profile of the shared AWS config and credentials files.
///
/// The standard lookup honours `AWS_SHARED_CREDENTIALS_FILE`,
/// `AWS_CONFIG_FILE` and `AWS_PROFILE`, falling back to `~/.aws` and the
/// `default` profile.
#[derive(Debug, Clone)]
pub struct ProfileFileCredentialsProvider {
    /// SDK profile provider.
    inner: SharedCredentialsProvider,
}

impl ProfileFileCredentialsProvider {
    /// Creates a provider using the standard file and profile lookup.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SharedCredentialsProvider::new(SdkProfileFileProvider::builder().build()),
        }
    }

    /// Creates a provider reading `profile` from the credentials file at
    /// `path` only.
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>, profile: impl Into<String>) -> Self {
        let files =
            ProfileFiles::builder().with_file(ProfileFileKind::Credentials, path.into()).build();
        let provider =
            SdkProfileFileProvider::builder().profile_files(files).profile_name(profile).build();
        Self {
            inner: SharedCredentialsProvider::new(provider),
        }
    }
}

impl Default for ProfileFileCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialsProvider for ProfileFileCredentialsProvider {
    fn shared_provider(&self) -> SharedCredentialsProvider {
        self.inner.clone()
    }

    fn name(&self) -> &'static str {
        "ProfileFile"
    }
}

// ============================================================================
// SECTION: Default Chain
// ============================================================================

/// The SDK's default chain: environment, profile files, web identity, ECS and
/// instance metadata, in that order.
#[derive(Debug, Clone)]
pub struct DefaultCredentialsProviderChain {
    /// Lazily built SDK chain.
    inner: SharedCredentialsProvider,
}

impl DefaultCredentialsProviderChain {
    /// Creates the chain. The SDK chain itself is built on first use.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SharedCredentialsProvider::new(LazyDefaultChain::default()),
        }
    }
}

impl Default for DefaultCredentialsProviderChain {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialsProvider for DefaultCredentialsProviderChain {
    fn shared_provider(&self) -> SharedCredentialsProvider {
        self.inner.clone()
    }

    fn name(&self) -> &'static str {
        "DefaultChain"
    }
}

/// Defers the async build of [`DefaultCredentialsChain`] until the first
/// credentials request.
#[derive(Debug, Default)]
struct LazyDefaultChain {
    /// Chain built on first request.
    chain: OnceCell<DefaultCredentialsChain>,
}

impl ProvideCredentials for LazyDefaultChain {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::new(async move {
            let chain =
                self.chain.get_or_init(|| DefaultCredentialsChain::builder().build()).await;
            chain.provide_credentials().await
        })
    }
}

// ============================================================================
// SECTION: Static Provider
// ============================================================================

/// Fixed credentials supplied in code.
///
/// Registered without a zero-argument constructor, so naming it in
/// configuration is rejected.
#[derive(Debug, Clone)]
pub struct StaticCredentialsProvider {
    /// SDK credentials, which redact the secret in `Debug`.
    inner: SharedCredentialsProvider,
}

impl StaticCredentialsProvider {
    /// Creates a provider that always returns the given keys.
    #[must_use]
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        let credentials =
            Credentials::new(access_key_id, secret_access_key, session_token, None, "Static");
        Self {
            inner: SharedCredentialsProvider::new(credentials),
        }
    }
}

impl CredentialsProvider for StaticCredentialsProvider {
    fn shared_provider(&self) -> SharedCredentialsProvider {
        self.inner.clone()
    }

    fn name(&self) -> &'static str {
        "Static"
    }
}
