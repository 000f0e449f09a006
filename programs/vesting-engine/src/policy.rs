//! Who may do what. Every mutating operation goes through `authorize`.

use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::VestingConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Owner-only administration: update, revoke, withdraw, pause, creator rotation.
    Administer,
    /// Direct schedule creation.
    CreateSchedules,
    /// Paying out a beneficiary's schedules: the beneficiary or the owner.
    ManageSchedule { beneficiary: Pubkey },
}

pub fn authorize(config: &VestingConfig, required: Capability, caller: &Pubkey) -> Result<()> {
    match required {
        Capability::Administer => {
            require_keys_eq!(*caller, config.owner, VestingError::UnauthorizedOwner)
        }
        Capability::CreateSchedules => {
            require_keys_eq!(*caller, config.creator, VestingError::UnauthorizedCreator)
        }
        Capability::ManageSchedule { beneficiary } => {
            require!(
                *caller == beneficiary || *caller == config.owner,
                VestingError::UnauthorizedCaller
            )
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_map_to_roles() {
        let owner = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let beneficiary = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let cfg = VestingConfig {
            owner,
            creator,
            ..Default::default()
        };

        assert!(authorize(&cfg, Capability::Administer, &owner).is_ok());
        assert!(authorize(&cfg, Capability::Administer, &creator).is_err());

        assert!(authorize(&cfg, Capability::CreateSchedules, &creator).is_ok());
        assert!(authorize(&cfg, Capability::CreateSchedules, &owner).is_err());

        let manage = Capability::ManageSchedule { beneficiary };
        assert!(authorize(&cfg, manage, &beneficiary).is_ok());
        assert!(authorize(&cfg, manage, &owner).is_ok());
        assert!(authorize(&cfg, manage, &stranger).is_err());
    }
}
