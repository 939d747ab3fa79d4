mod book_inventory;

pub use book_inventory::HttpBookInventory;
