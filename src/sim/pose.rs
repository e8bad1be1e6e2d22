//! Device pose resolution
//!
//! Tracked poses arrive in tracking space, independent of the scene camera.
//! The renderer applies the camera transform to every object, so the camera
//! has to be undone here to place controller visuals where the device is.

use glam::Mat4;

/// Resolve a raw device pose into a world-relative transform.
///
/// Returns `inverse(camera) * pose`, or identity when the device is untracked.
#[inline]
pub fn resolve_pose(camera: &Mat4, device_pose: Option<&Mat4>) -> Mat4 {
    match device_pose {
        Some(pose) => camera.inverse() * *pose,
        None => Mat4::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_untracked_is_identity() {
        let camera = Mat4::from_translation(Vec3::new(0.0, -1.0, 0.2));
        assert_eq!(resolve_pose(&camera, None), Mat4::IDENTITY);
    }

    #[test]
    fn test_identity_camera_passes_pose_through() {
        let pose = Mat4::from_rotation_x(0.3) * Mat4::from_translation(Vec3::new(0.5, 0.2, -0.1));
        let resolved = resolve_pose(&Mat4::IDENTITY, Some(&pose));
        assert!(resolved.abs_diff_eq(pose, 1e-6));
    }

    #[test]
    fn test_camera_translation_removed() {
        let camera = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let pose = Mat4::from_translation(Vec3::new(0.3, 1.5, 0.0));
        let resolved = resolve_pose(&camera, Some(&pose));
        assert!(resolved.w_axis.truncate().abs_diff_eq(Vec3::new(0.3, 0.5, 0.0), 1e-6));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let camera = Mat4::look_at_rh(Vec3::new(0.0, -1.0, 0.2), Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        let pose = Mat4::from_rotation_z(1.1) * Mat4::from_translation(Vec3::new(0.1, 0.2, 0.3));
        let first = resolve_pose(&camera, Some(&pose));
        let second = resolve_pose(&camera, Some(&pose));
        assert_eq!(first, second);
    }
}
