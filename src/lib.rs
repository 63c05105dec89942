#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use sg_cfg as cfg;
pub use sg_graph as graph;
pub use sg_utils as utils;
