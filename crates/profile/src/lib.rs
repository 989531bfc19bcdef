//! Label sheet profiles.
//!
//! A [`Profile`] describes one physical label sheet: the grid of labels on a
//! page, the size of a single label, which record fields are printed and on
//! which side of the label the code goes. Profiles are declared as named
//! sections of a TOML configuration file ([`ConfigFile`]) and turned into
//! validated values by [`resolve_profile`].

mod config;
mod error;
mod profile;
mod resolve;

pub use config::{ConfigFile, RawSection, SectionKind};
pub use error::ProfileError;
pub use profile::{
    DEFAULT_CODE_FRACTION, DEFAULT_FIELDS, FIELD_DELIMITER, GeneralDefaults, Profile,
};
pub use resolve::resolve_profile;
