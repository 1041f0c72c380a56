pub mod hook;
pub mod install;
pub mod scaffold;
pub mod validate;
