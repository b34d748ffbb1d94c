// SPDX-License-Identifier: GPL-3.0-only

//! Platform collaborator boundaries: camera, location, gallery, share

pub mod camera;
pub mod gallery;
pub mod location;
pub mod share;
