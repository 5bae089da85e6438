//! Live preview bundling: scan → select entry → inject → change-detect.

pub mod bundler;
pub mod fingerprint;
pub mod inject;
pub mod scan;

pub use bundler::{Bundle, PreviewBundler};
pub use scan::{scan, AssetKind, AssetScan};
