mod metadata_ext;
mod path_ext;

pub use metadata_ext::MetadataTimesExt;
pub use path_ext::PathExt;
