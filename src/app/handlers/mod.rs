// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules

pub mod camera;
