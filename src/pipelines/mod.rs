// SPDX-License-Identifier: GPL-3.0-only

//! Image processing pipelines

pub mod blur;
