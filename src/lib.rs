#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use cm_bean as bean;
pub use cm_cfg as cfg;
pub use cm_fs as fs;
pub use cm_mapper as mapper;
pub use cm_mime as mime;
pub use cm_time as time;
pub use cm_utils as utils;
