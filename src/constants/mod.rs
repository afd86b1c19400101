pub mod common;
pub mod packages;
pub mod urls;

pub use common::{
    BANNER_TITLE, DPKG_QUERY_NOT_FOUND, GUI_QUESTION, LONGEST_STATUS, OUTPUT_WIDTH,
};
