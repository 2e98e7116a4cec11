//! Profile assembly: validation, depth extension, subsoil block.

use thiserror::Error;

use super::layer::TabulatedLayer;

/// Error type for profile assembly.
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    /// Depth interval with `z_max <= z_min`.
    #[error("invalid depth interval: z_min = {z_min}, z_max = {z_max}")]
    InvalidInterval { z_min: f64, z_max: f64 },

    /// No layers supplied.
    #[error("profile has no layers")]
    Empty,

    /// First layer does not start at the surface.
    #[error("first layer starts at {z_min} cm, expected 0")]
    NotAtSurface { z_min: f64 },

    /// Adjacent layers leave a gap or overlap.
    #[error("layer {index} starts at {z_min} cm but the previous layer ends at {prev_z_max} cm")]
    NotContiguous {
        index: usize,
        z_min: f64,
        prev_z_max: f64,
    },
}

/// How to reach the required rooting depth when the declared profile
/// is too shallow.
///
/// Both policies assume the soil is hydraulically uniform below the
/// deepest measured layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthExtension {
    /// Grow the deepest layer's thickness until the profile reaches
    /// the required depth.
    StretchDeepest,
    /// Append a new layer spanning from the current bottom to the
    /// required depth, duplicating the deepest layer's parameters and
    /// tables.
    AppendDuplicate,
}

/// The terminal, immutable profile artifact.
#[derive(Clone, Debug)]
pub struct SoilProfile {
    /// Ordered layers, top to bottom
    pub layers: Vec<TabulatedLayer>,
    /// Fallback block below the explicit profile, copied from the
    /// deepest layer
    pub sub_soil: TabulatedLayer,
    /// Sum of layer thicknesses in cm (`RDMSOL`)
    pub total_depth: f64,
}

/// Assemble a profile from tabulated layers.
///
/// Validates ordering invariants, extends the profile to
/// `required_rooting_depth` per `policy` when it falls short, sums
/// the total depth, and copies the deepest layer into the subsoil
/// block.
///
/// # Errors
/// [`ProfileError::Empty`], [`ProfileError::NotAtSurface`], or
/// [`ProfileError::NotContiguous`] when the layer sequence violates
/// the profile invariants.
pub fn assemble_profile(
    mut layers: Vec<TabulatedLayer>,
    required_rooting_depth: f64,
    policy: DepthExtension,
) -> Result<SoilProfile, ProfileError> {
    let first = layers.first().ok_or(ProfileError::Empty)?;
    if first.layer.depth.z_min != 0.0 {
        return Err(ProfileError::NotAtSurface {
            z_min: first.layer.depth.z_min,
        });
    }
    for i in 1..layers.len() {
        let prev_z_max = layers[i - 1].layer.depth.z_max;
        let z_min = layers[i].layer.depth.z_min;
        if z_min != prev_z_max {
            return Err(ProfileError::NotContiguous {
                index: i,
                z_min,
                prev_z_max,
            });
        }
    }

    let bottom = layers.last().expect("checked non-empty").layer.depth.z_max;
    if bottom < required_rooting_depth {
        match policy {
            DepthExtension::StretchDeepest => {
                let deepest = layers.last_mut().expect("checked non-empty");
                deepest.layer.depth.z_max = required_rooting_depth;
            }
            DepthExtension::AppendDuplicate => {
                let deepest = layers.last().expect("checked non-empty");
                let mut appended = deepest.clone();
                appended.layer.index = deepest.layer.index + 1;
                appended.layer.depth.z_min = bottom;
                appended.layer.depth.z_max = required_rooting_depth;
                layers.push(appended);
            }
        }
    }

    let total_depth = layers.iter().map(|l| l.layer.depth.thickness()).sum();
    let sub_soil = layers.last().expect("checked non-empty").clone();

    Ok(SoilProfile {
        layers,
        sub_soil,
        total_depth,
    })
}
