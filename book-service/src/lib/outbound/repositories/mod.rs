mod book;

pub use book::MongoBookRepository;
