#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod document;
mod errors;
mod find;
mod load;
mod matcher;
mod options;
pub mod tags;

pub use document::Document;
pub use errors::{Error, Origin, ParseFailure, Result};
pub use find::{
    attr, find, find_all, find_all_by_attribute, find_all_by_attribute_name,
    find_all_by_attribute_name_value, find_all_by_class, find_all_by_tag_name, find_by_id, iter,
    FindIter, Root,
};
pub use load::{load_buffer, load_content, load_file, load_path, load_reader, Loader};
pub use matcher::{ByAttribute, ByClass, ById, ByTag, Matcher};
pub use options::{LoadOptions, RequestConfig, WithHeaders, HTTP_REQUEST_TIMEOUT};

pub use tl::{HTMLTag, Node, NodeHandle, ParserOptions, VDom};
pub use url::Url;
