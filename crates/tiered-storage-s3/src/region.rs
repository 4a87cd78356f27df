// crates/tiered-storage-s3/src/region.rs
// ============================================================================
// Module: S3 Regions
// Description: Fixed enumeration of AWS regions accepted by the S3 backend.
// Purpose: Reject unknown region tokens at configuration time.
// Dependencies: aws-sdk-s3, serde, thiserror
// ============================================================================

//! ## Overview
//! Region names are matched exactly (lower-case, as AWS publishes them). The
//! enumeration is closed so that typos fail validation instead of surfacing
//! later as endpoint resolution errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use aws_sdk_s3::config::Region;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Region
// ============================================================================

/// AWS region hosting the bucket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum S3Region {
    /// `us-gov-west-1`
    UsGovWest1,
    /// `us-gov-east-1`
    UsGovEast1,
    /// `us-east-1`
    UsEast1,
    /// `us-east-2`
    UsEast2,
    /// `us-west-1`
    UsWest1,
    /// `us-west-2`
    #[default]
    UsWest2,
    /// `eu-west-1`
    EuWest1,
    /// `eu-west-2`
    EuWest2,
    /// `eu-west-3`
    EuWest3,
    /// `eu-central-1`
    EuCentral1,
    /// `eu-north-1`
    EuNorth1,
    /// `eu-south-1`
    EuSouth1,
    /// `ap-east-1`
    ApEast1,
    /// `ap-south-1`
    ApSouth1,
    /// `ap-southeast-1`
    ApSoutheast1,
    /// `ap-southeast-2`
    ApSoutheast2,
    /// `ap-northeast-1`
    ApNortheast1,
    /// `ap-northeast-2`
    ApNortheast2,
    /// `ap-northeast-3`
    ApNortheast3,
    /// `sa-east-1`
    SaEast1,
    /// `cn-north-1`
    CnNorth1,
    /// `cn-northwest-1`
    CnNorthwest1,
    /// `ca-central-1`
    CaCentral1,
    /// `me-south-1`
    MeSouth1,
    /// `af-south-1`
    AfSouth1,
    /// `us-iso-east-1`
    UsIsoEast1,
    /// `us-isob-east-1`
    UsIsobEast1,
    /// `us-iso-west-1`
    UsIsoWest1,
}

impl S3Region {
    /// Region used when the configuration leaves it unset.
    pub const DEFAULT: Self = Self::UsWest2;

    /// Every region, in the same order as [`Self::NAMES`].
    pub const ALL: [Self; 28] = [
        Self::UsGovWest1,
        Self::UsGovEast1,
        Self::UsEast1,
        Self::UsEast2,
        Self::UsWest1,
        Self::UsWest2,
        Self::EuWest1,
        Self::EuWest2,
        Self::EuWest3,
        Self::EuCentral1,
        Self::EuNorth1,
        Self::EuSouth1,
        Self::ApEast1,
        Self::ApSouth1,
        Self::ApSoutheast1,
        Self::ApSoutheast2,
        Self::ApNortheast1,
        Self::ApNortheast2,
        Self::ApNortheast3,
        Self::SaEast1,
        Self::CnNorth1,
        Self::CnNorthwest1,
        Self::CaCentral1,
        Self::MeSouth1,
        Self::AfSouth1,
        Self::UsIsoEast1,
        Self::UsIsobEast1,
        Self::UsIsoWest1,
    ];

    /// Every region name, used as the enumeration domain of the region key.
    pub const NAMES: [&'static str; 28] = [
        "us-gov-west-1",
        "us-gov-east-1",
        "us-east-1",
        "us-east-2",
        "us-west-1",
        "us-west-2",
        "eu-west-1",
        "eu-west-2",
        "eu-west-3",
        "eu-central-1",
        "eu-north-1",
        "eu-south-1",
        "ap-east-1",
        "ap-south-1",
        "ap-southeast-1",
        "ap-southeast-2",
        "ap-northeast-1",
        "ap-northeast-2",
        "ap-northeast-3",
        "sa-east-1",
        "cn-north-1",
        "cn-northwest-1",
        "ca-central-1",
        "me-south-1",
        "af-south-1",
        "us-iso-east-1",
        "us-isob-east-1",
        "us-iso-west-1",
    ];

    /// Returns the AWS region name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsGovWest1 => "us-gov-west-1",
            Self::UsGovEast1 => "us-gov-east-1",
            Self::UsEast1 => "us-east-1",
            Self::UsEast2 => "us-east-2",
            Self::UsWest1 => "us-west-1",
            Self::UsWest2 => "us-west-2",
            Self::EuWest1 => "eu-west-1",
            Self::EuWest2 => "eu-west-2",
            Self::EuWest3 => "eu-west-3",
            Self::EuCentral1 => "eu-central-1",
            Self::EuNorth1 => "eu-north-1",
            Self::EuSouth1 => "eu-south-1",
            Self::ApEast1 => "ap-east-1",
            Self::ApSouth1 => "ap-south-1",
            Self::ApSoutheast1 => "ap-southeast-1",
            Self::ApSoutheast2 => "ap-southeast-2",
            Self::ApNortheast1 => "ap-northeast-1",
            Self::ApNortheast2 => "ap-northeast-2",
            Self::ApNortheast3 => "ap-northeast-3",
            Self::SaEast1 => "sa-east-1",
            Self::CnNorth1 => "cn-north-1",
            Self::CnNorthwest1 => "cn-northwest-1",
            Self::CaCentral1 => "ca-central-1",
            Self::MeSouth1 => "me-south-1",
            Self::AfSouth1 => "af-south-1",
            Self::UsIsoEast1 => "us-iso-east-1",
            Self::UsIsobEast1 => "us-isob-east-1",
            Self::UsIsoWest1 => "us-iso-west-1",
        }
    }

    /// Converts to the AWS SDK region type.
    #[must_use]
    pub fn to_sdk_region(self) -> Region {
        Region::from_static(self.as_str())
    }
}

impl fmt::Display for S3Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a region name is not in the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown region: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for S3Region {
    type Err = UnknownRegion;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == name)
            .ok_or_else(|| UnknownRegion(name.to_string()))
    }
}

impl TryFrom<String> for S3Region {
    type Error = UnknownRegion;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<S3Region> for String {
    fn from(region: S3Region) -> Self {
        region.as_str().to_string()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
