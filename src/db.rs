pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod listing_repo;
pub use listing_repo::ListingRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
