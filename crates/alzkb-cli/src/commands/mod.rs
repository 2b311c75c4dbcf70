//! Command implementations.

pub mod check_rows;
pub mod csf;
pub mod curate;
pub mod genotype;
pub mod prune;
pub mod rank;
pub mod score;
pub mod sentinels;
pub mod validate;

pub use self::check_rows::execute_check_rows;
pub use self::csf::execute_csf;
pub use self::curate::execute_curate;
pub use self::genotype::execute_genotype;
pub use self::prune::execute_prune;
pub use self::rank::execute_rank;
pub use self::score::execute_score;
pub use self::sentinels::execute_sentinels;
pub use self::validate::execute_validate;
