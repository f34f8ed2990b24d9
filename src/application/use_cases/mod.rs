/// Use cases module containing application business logic orchestration
mod ancestry;
mod notification;

pub use ancestry::AncestryUseCase;
pub use notification::NotificationUseCase;
