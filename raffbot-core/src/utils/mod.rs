// raffbot-core/src/utils/mod.rs
pub mod duration;
