pub mod errors;
pub mod schema;
pub mod tables;

pub use errors::LoaderError;
pub use tables::{
    customers_from_bytes, customers_from_path, delivery_from_bytes, delivery_from_path,
    orders_from_bytes, orders_from_path, ratings_from_bytes, ratings_from_path,
    restaurants_from_bytes, restaurants_from_path, DashboardTables, CUSTOMERS_FILE, DELIVERY_FILE,
    ORDERS_FILE, RATINGS_FILE, RESTAURANTS_FILE,
};

#[cfg(test)]
mod tests;
