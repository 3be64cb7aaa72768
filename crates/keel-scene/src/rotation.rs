// SPDX-License-Identifier: Apache-2.0
use keel_math::{Euler, EulerOrder, Quat};

/// A node's rotation kept in two synchronized representations.
///
/// The quaternion is authoritative for matrix composition; the Euler view
/// exists for editing and inspection. Synchronization is explicit: every
/// setter re-derives the other representation through
/// [`Rotation::sync_from_quat`] / [`Rotation::sync_from_euler`], so neither
/// side can silently drift.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rotation {
    quat: Quat,
    euler: Euler,
}

impl Rotation {
    /// Identity rotation.
    pub fn identity() -> Self {
        Self::default()
    }

    /// The quaternion representation.
    pub fn quat(&self) -> Quat {
        self.quat
    }

    /// The Euler representation (same rotation, current order).
    pub fn euler(&self) -> Euler {
        self.euler
    }

    /// Sets the rotation from a quaternion and re-derives the Euler view.
    ///
    /// The stored quaternion is the normalized form of the input. That is
    /// a deliberate tightening over plain pass-through storage: every
    /// rotation a node composes into a matrix stays unit-length, and
    /// matrix extraction assumes exactly that. Callers that need a
    /// non-unit quaternion must keep it outside the node. The Euler view
    /// keeps its current rotation order.
    pub fn set_quat(&mut self, quat: Quat) {
        self.quat = quat.normalize();
        self.sync_from_quat();
    }

    /// Sets the rotation from Euler angles and re-derives the quaternion.
    pub fn set_euler(&mut self, euler: Euler) {
        self.euler = euler;
        self.sync_from_euler();
    }

    /// Reinterprets the current Euler angles under a new order.
    ///
    /// This changes the represented rotation (the angles are kept, the
    /// order changes); use [`Euler::reorder`] first to keep the rotation.
    pub fn set_order(&mut self, order: EulerOrder) {
        self.euler = Euler::new(self.euler.x(), self.euler.y(), self.euler.z(), order);
        self.sync_from_euler();
    }

    /// Re-derives the Euler view from the quaternion, preserving the
    /// Euler order. The quaternion is not renormalized here.
    fn sync_from_quat(&mut self) {
        self.euler = Euler::from_quat(&self.quat, self.euler.order());
    }

    /// Re-derives the quaternion from the Euler view.
    fn sync_from_euler(&mut self) {
        self.quat = Quat::from_euler(&self.euler);
    }
}
