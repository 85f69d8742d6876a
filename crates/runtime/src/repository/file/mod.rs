mod session;

pub use session::FileSessionRepository;
