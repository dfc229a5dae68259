//! A library for reading and writing iTunes style MPEG-4 metadata and the surrounding box tree.
//!
//! # Examples
//!
//! ## The easy way
//! ```no_run
//! let mut tag = mp4tag::Tag::read_from_path("music.m4a").unwrap();
//!
//! println!("{}", tag.artist().unwrap());
//!
//! tag.set_artist("artist");
//! tag.write_to_path("music.m4a").unwrap();
//! ```
//!
//! ## The hard way
//! ```no_run
//! use mp4tag::{Data, Fourcc, Tag};
//!
//! let mut tag = Tag::read_from_path("music.m4a").unwrap();
//! let artist_ident = Fourcc(*b"\xa9ART");
//!
//! let artist = tag.strings_of(&artist_ident).next().unwrap().to_owned();
//! println!("{artist}");
//!
//! tag.set_data(artist_ident, Data::Utf8("artist".to_owned()));
//! tag.write_to_path("music.m4a").unwrap();
//! ```
//!
//! ## Using freeform identifiers
//! ```no_run
//! use mp4tag::{Data, FreeformIdent, Tag};
//!
//! let mut tag = Tag::read_from_path("music.m4a").unwrap();
//! let isrc_ident = FreeformIdent::new("com.apple.iTunes", "ISRC");
//!
//! let isrc = tag.strings_of(&isrc_ident).next().unwrap().to_owned();
//! println!("{isrc}");
//!
//! tag.set_data(&isrc_ident, Data::Utf8("isrc".to_owned()));
//! tag.write_to_path("music.m4a").unwrap();
//! ```
//!
//! ## Choosing a traversal
//! ```no_run
//! use mp4tag::{Mp4File, ReadConfig};
//!
//! let mut file = Mp4File::read_from_path_with("music.m4a", &ReadConfig::tag()).unwrap();
//! file.tag_mut().set_album("album");
//! file.save().unwrap();
//! ```
#![warn(missing_docs)]
pub use crate::atom::ident::*;
pub use crate::atom::{ident, Data, MetaItem, ReadConfig};
pub use crate::buffer::Buffer;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::file::{MediaFile, Mode};
pub use crate::mp4file::{ChunkOffsetTable, Mp4File};
pub use crate::tag::{Tag, STANDARD_GENRES};
pub use crate::types::*;

mod atom;
mod buffer;
mod error;
mod file;
mod mp4file;
mod tag;
mod types;
mod util;
