use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::camera::CameraKind;
use crate::error::CameraError;
use crate::intrinsics::CameraIntrinsics;

/// Interior parameters shared by every image taken with one physical
/// camera: intrinsics plus the projection model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraInterior {
    /// The interior parameters.
    pub intrinsics: CameraIntrinsics,
    /// The projection model.
    pub kind: CameraKind,
}

/// Read-only registry of interior parameters keyed by camera id.
///
/// Built once from ingested records before any tile processing starts, so
/// worker threads only ever perform lookups.
#[derive(Debug, Default)]
pub struct CameraRegistry {
    cameras: HashMap<String, CameraInterior>,
}

impl CameraRegistry {
    /// Build a registry from (camera id, interior parameters) records.
    ///
    /// # Errors
    ///
    /// Returns an error if the same camera id appears twice.
    pub fn from_records<I>(records: I) -> Result<Self, CameraError>
    where
        I: IntoIterator<Item = (String, CameraInterior)>,
    {
        let mut cameras = HashMap::new();
        for (id, interior) in records {
            if cameras.insert(id.clone(), interior).is_some() {
                return Err(CameraError::DuplicateCameraId(id));
            }
        }
        Ok(Self { cameras })
    }

    /// Look up the interior parameters for a camera id.
    pub fn get(&self, id: &str) -> Option<&CameraInterior> {
        self.cameras.get(id)
    }

    /// The number of registered cameras.
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}
