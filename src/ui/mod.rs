// SPDX-License-Identifier: MPL-2.0
//! UI components: screens, the navigation bar, the toast subsystem, and
//! the shared design tokens they draw from.

pub mod design_tokens;
pub mod directory;
pub mod navbar;
pub mod profile;
pub mod register;
pub mod toasts;
