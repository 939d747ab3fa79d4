mod user;

pub use user::MongoUserRepository;
