//! Collaborator impls for the handle types a bridge is usually bound through.
//!
//! `Weak<RefCell<T>>` is the non-owning form: the backend is owned by the host
//! and the bridge notices (via `is_bound`) once it is gone.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use skidsteer_core::control::DriveOutput;
use skidsteer_core::state::KinematicsState;
use tracing::warn;

use super::{Actuator, KinematicsProvider};

impl<T: KinematicsProvider + ?Sized> KinematicsProvider for &T {
    fn sample(&self) -> Option<KinematicsState> {
        (**self).sample()
    }

    fn is_bound(&self) -> bool {
        (**self).is_bound()
    }
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    fn apply(&mut self, output: &DriveOutput, dt: f32) {
        (**self).apply(output, dt)
    }

    fn is_bound(&self) -> bool {
        (**self).is_bound()
    }
}

impl<T: KinematicsProvider + ?Sized> KinematicsProvider for Rc<RefCell<T>> {
    fn sample(&self) -> Option<KinematicsState> {
        // A backend mutably borrowed elsewhere has no consistent sample to offer
        self.try_borrow().ok()?.sample()
    }

    fn is_bound(&self) -> bool {
        self.try_borrow().map(|b| b.is_bound()).unwrap_or(true)
    }
}

impl<T: Actuator + ?Sized> Actuator for Rc<RefCell<T>> {
    fn apply(&mut self, output: &DriveOutput, dt: f32) {
        match self.try_borrow_mut() {
            Ok(mut backend) => backend.apply(output, dt),
            Err(_) => warn!("actuator busy, dropping drive output {:?}", output),
        }
    }

    fn is_bound(&self) -> bool {
        self.try_borrow().map(|b| b.is_bound()).unwrap_or(true)
    }
}

impl<T: KinematicsProvider + ?Sized> KinematicsProvider for Weak<RefCell<T>> {
    fn sample(&self) -> Option<KinematicsState> {
        self.upgrade()?.sample()
    }

    fn is_bound(&self) -> bool {
        self.upgrade().is_some_and(|backend| KinematicsProvider::is_bound(&backend))
    }
}

impl<T: Actuator + ?Sized> Actuator for Weak<RefCell<T>> {
    fn apply(&mut self, output: &DriveOutput, dt: f32) {
        match self.upgrade() {
            Some(mut backend) => backend.apply(output, dt),
            None => warn!("actuator dropped, discarding drive output {:?}", output),
        }
    }

    fn is_bound(&self) -> bool {
        self.upgrade().is_some_and(|backend| Actuator::is_bound(&backend))
    }
}
