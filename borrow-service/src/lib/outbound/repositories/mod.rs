mod loan;

pub use loan::MongoLoanRepository;
