//! Client Repositories

mod addresses;
mod profiles;

pub(crate) use addresses::PgAddressesRepository;
pub(crate) use profiles::PgClientProfilesRepository;
