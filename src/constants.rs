//! # Constants and type definitions for Sweeper
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! aliases** used throughout the `sweeper` library.
//!
//! ## Overview
//!
//! - Geophysical constants (Earth radius, gravitational parameter)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, rev/day ↔ rad/s)
//! - Core type aliases used across the crate
//!
//! Distances are expressed in **kilometers** everywhere in the crate; angles stored in
//! records are **radians**, angles exchanged with catalog files and feature vectors are **degrees**.

use nalgebra::Vector3;

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Mean Earth radius in kilometers, lower bound for any semi-major axis
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth equatorial radius in kilometers, used for circular-orbit speeds
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.0;

/// Earth gravitational parameter μ in km³/s²
pub const MU_EARTH: f64 = 398_600.4418;

/// Revolutions per day → radians per second
pub const REV_PER_DAY_TO_RAD_PER_SEC: f64 = DPI / SECONDS_PER_DAY;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Duration in seconds
pub type Seconds = f64;
/// Modified Julian Date (days)
pub type MJD = f64;

/// Cartesian position in kilometers (Earth-fixed unless stated otherwise)
pub type PositionVector = Vector3<f64>;
