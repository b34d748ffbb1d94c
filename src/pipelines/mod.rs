// SPDX-License-Identifier: GPL-3.0-only

//! Data transformation pipelines

pub mod watermark;
