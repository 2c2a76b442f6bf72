//! Export side of tessera: minification, bundles, batch builds and block storage.

pub mod assets;
pub mod builder;
pub mod bundle;
pub mod minify;
pub mod store;
pub mod templates;

pub use assets::{AssetPipeline, MinifyError};
pub use builder::{
    BuildConfig, BuildError, BuildFailure, BuildResult, ExportBuilder, ManifestEntry,
};
pub use bundle::{bundle, download_file_name, slug};
pub use minify::{minify, minify_code, minify_css, minify_html, SourceKind};
pub use store::{BlockStore, FileBlockStore, StoreError};
