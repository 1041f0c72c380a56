pub mod frontmatter;

pub use frontmatter::{extract_frontmatter_block, has_frontmatter_delimiter, parse_yaml_block};
