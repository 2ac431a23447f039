pub(crate) mod addresses;
pub(crate) mod orders;

pub(crate) use addresses::PgAddressesRepository;
pub(crate) use orders::PgOrdersRepository;
