//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, cache, hashing, mail, storage) are implemented
//! by outbound adapters. Driving ports are implemented by domain services and
//! consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod appointment_repository;
mod appointments_command;
mod appointments_query;
mod availability_query;
mod cache_key;
mod cache_provider;
mod hash_provider;
mod login_service;
mod mail_provider;
mod mail_template_provider;
mod notification_repository;
mod password_recovery_command;
mod profile_query;
mod providers_query;
mod storage_provider;
mod user_account_command;
mod user_repository;
mod user_token_repository;

#[cfg(test)]
pub use appointment_repository::MockAppointmentRepository;
pub use appointment_repository::{AppointmentRepository, AppointmentRepositoryError};
#[cfg(test)]
pub use appointments_command::MockAppointmentsCommand;
pub use appointments_command::{AppointmentsCommand, CreateAppointmentRequest};
#[cfg(test)]
pub use appointments_query::MockAppointmentsQuery;
pub use appointments_query::AppointmentsQuery;
#[cfg(test)]
pub use availability_query::MockAvailabilityQuery;
pub use availability_query::AvailabilityQuery;
pub use cache_key::{CacheKey, CacheKeyValidationError};
#[cfg(test)]
pub use cache_provider::MockCacheProvider;
pub use cache_provider::{
    CACHE_NAMESPACE, CACHE_TTL, CacheError, CacheProvider, recover_json, save_json,
};
#[cfg(test)]
pub use hash_provider::MockHashProvider;
pub use hash_provider::{HashError, HashProvider};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use mail_provider::MockMailProvider;
pub use mail_provider::{MailError, MailMessage, MailProvider};
#[cfg(test)]
pub use mail_template_provider::MockMailTemplateProvider;
pub use mail_template_provider::{MailTemplate, MailTemplateError, MailTemplateProvider};
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{NotificationRepository, NotificationRepositoryError};
#[cfg(test)]
pub use password_recovery_command::MockPasswordRecoveryCommand;
pub use password_recovery_command::{PasswordRecoveryCommand, ResetPasswordRequest};
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use providers_query::MockProvidersQuery;
pub use providers_query::ProvidersQuery;
#[cfg(test)]
pub use storage_provider::MockStorageProvider;
pub use storage_provider::{StorageError, StorageProvider};
#[cfg(test)]
pub use user_account_command::MockUserAccountCommand;
pub use user_account_command::{
    CreateUserRequest, UpdateAvatarRequest, UpdateProfileRequest, UserAccountCommand,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_token_repository::MockUserTokenRepository;
pub use user_token_repository::{UserTokenRepository, UserTokenRepositoryError};
