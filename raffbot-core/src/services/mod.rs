// raffbot-core/src/services/mod.rs

pub mod giveaway_service;
pub mod lottery;
pub mod pricing;
pub mod registry;

pub use giveaway_service::GiveawayService;
pub use pricing::PricingConfig;
pub use registry::GiveawayRegistry;
