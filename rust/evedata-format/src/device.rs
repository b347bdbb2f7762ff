use std::{fmt, str::FromStr};

use evedata_common::{Result, error::Error};
use serde::{Deserialize, Serialize};

/// Kind of device a series was recorded from. Determines fill semantics
/// in a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Unknown,
    /// A measured quantity; absent when not sampled.
    Channel,
    /// A positioning quantity; holds its last value until it moves again.
    Axis,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceType::Unknown => "unknown",
            DeviceType::Channel => "channel",
            DeviceType::Axis => "axis",
        })
    }
}

/// Policy governing how a join synthesizes values for position references
/// missing from an input series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FillRule {
    /// Keep only position references present in every series.
    #[default]
    #[serde(rename = "none")]
    NoFill,
    /// Axes without a sample repeat their last value (the axis hasn't moved).
    #[serde(rename = "last")]
    LastFill,
    /// Floating-point channels without a sample get NaN.
    #[serde(rename = "nan")]
    NANFill,
    /// `LastFill` and `NANFill` together.
    #[serde(rename = "last-nan")]
    LastNANFill,
}

impl FillRule {
    pub const ALL: [FillRule; 4] = [
        FillRule::NoFill,
        FillRule::LastFill,
        FillRule::NANFill,
        FillRule::LastNANFill,
    ];

    /// `true` if the row index is the intersection of all inputs,
    /// `false` if it is the union.
    pub fn intersects(&self) -> bool {
        *self == FillRule::NoFill
    }

    /// `true` if axes carry their previous value forward under this rule.
    pub fn carries_axes(&self) -> bool {
        matches!(self, FillRule::LastFill | FillRule::LastNANFill)
    }

    /// `true` if channels are NaN-filled under this rule.
    pub fn nan_fills_channels(&self) -> bool {
        matches!(self, FillRule::NANFill | FillRule::LastNANFill)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FillRule::NoFill => "none",
            FillRule::LastFill => "last",
            FillRule::NANFill => "nan",
            FillRule::LastNANFill => "last-nan",
        }
    }
}

impl fmt::Display for FillRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FillRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<FillRule> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "nofill" | "no-fill" => Ok(FillRule::NoFill),
            "last" | "lastfill" | "last-fill" => Ok(FillRule::LastFill),
            "nan" | "nanfill" | "nan-fill" => Ok(FillRule::NANFill),
            "last-nan" | "lastnanfill" | "last-nan-fill" => Ok(FillRule::LastNANFill),
            _ => Err(Error::invalid_arg(
                "fill_rule",
                format!("unrecognized fill rule '{s}'"),
            )),
        }
    }
}

/// Section of a chain the data belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Standard,
    Snapshot,
    Monitor,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Standard => "standard",
            Section::Snapshot => "snapshot",
            Section::Monitor => "monitor",
        })
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Section> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Section::Standard),
            "snapshot" => Ok(Section::Snapshot),
            "monitor" => Ok(Section::Monitor),
            _ => Err(Error::invalid_arg(
                "section",
                format!("unrecognized section '{s}'"),
            )),
        }
    }
}
