//! The value-movement capability the engine pays out through.
//!
//! The lifecycle decides amounts and authorization, then calls `Ledger`.
//! `VaultLedger` is the on-chain implementation: SPL token CPI for token
//! engines, system-program CPI for lamport engines.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::{CONFIG_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::state::{AssetKind, VestingConfig};

pub trait Holdings {
    /// Units in the vault that may back allocations.
    fn held(&self) -> Result<u64>;
}

pub trait Ledger: Holdings {
    /// Persist the config before value leaves the vault, so a nested entry
    /// observes the in-flight flag and the updated totals.
    fn checkpoint(&mut self, _config: &VestingConfig) -> Result<()> {
        Ok(())
    }

    /// Move `amount` from the vault to `to`. All or nothing.
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// Read access to the vault balance.
pub struct VaultHoldings<'info> {
    asset: AssetKind,
    vault: AccountInfo<'info>,
}

impl<'info> VaultHoldings<'info> {
    pub fn new(config: &VestingConfig, vault: &AccountInfo<'info>) -> Self {
        Self {
            asset: config.asset,
            vault: vault.clone(),
        }
    }
}

impl Holdings for VaultHoldings<'_> {
    fn held(&self) -> Result<u64> {
        match self.asset {
            AssetKind::Token => {
                let data = self.vault.try_borrow_data()?;
                let account = TokenAccount::try_deserialize(&mut &data[..])?;
                Ok(account.amount)
            }
            AssetKind::Native => {
                // the rent-exempt reserve keeps the vault alive and is never vested
                let reserve = Rent::get()?.minimum_balance(0);
                Ok(self.vault.lamports().saturating_sub(reserve))
            }
        }
    }
}

struct TokenCpi<'info> {
    mint: AccountInfo<'info>,
    decimals: u8,
    program: AccountInfo<'info>,
}

pub struct VaultLedger<'info> {
    holdings: VaultHoldings<'info>,
    config: AccountInfo<'info>,
    owner: Pubkey,
    mint: Pubkey,
    config_bump: u8,
    vault_bump: u8,
    destination: AccountInfo<'info>,
    token: Option<TokenCpi<'info>>,
    system_program: AccountInfo<'info>,
}

impl<'info> VaultLedger<'info> {
    pub fn new(
        config: &Account<'info, VestingConfig>,
        vault: &AccountInfo<'info>,
        destination: &AccountInfo<'info>,
        mint: Option<&InterfaceAccount<'info, Mint>>,
        token_program: Option<&Interface<'info, TokenInterface>>,
        system_program: &Program<'info, System>,
    ) -> Result<Self> {
        let token = match config.asset {
            AssetKind::Token => {
                let (Some(mint), Some(program)) = (mint, token_program) else {
                    return err!(VestingError::MissingTokenAccounts);
                };
                require_keys_eq!(mint.key(), config.mint, VestingError::InvalidTokenMint);
                require_keys_eq!(*vault.owner, program.key(), VestingError::InvalidTokenAccount);
                Some(TokenCpi {
                    mint: mint.to_account_info(),
                    decimals: mint.decimals,
                    program: program.to_account_info(),
                })
            }
            AssetKind::Native => None,
        };

        Ok(Self {
            holdings: VaultHoldings::new(config, vault),
            config: config.to_account_info(),
            owner: config.owner,
            mint: config.mint,
            config_bump: config.bump,
            vault_bump: config.vault_bump,
            destination: destination.clone(),
            token,
            system_program: system_program.to_account_info(),
        })
    }

    fn check_token_destination(&self, token: &TokenCpi<'info>, to: &Pubkey) -> Result<()> {
        require_keys_eq!(
            *self.destination.owner,
            token.program.key(),
            VestingError::InvalidTokenAccount
        );
        let data = self.destination.try_borrow_data()?;
        let account = TokenAccount::try_deserialize(&mut &data[..])?;
        require_keys_eq!(account.mint, self.mint, VestingError::InvalidTokenMint);
        require_keys_eq!(account.owner, *to, VestingError::InvalidDestination);
        Ok(())
    }
}

impl Holdings for VaultLedger<'_> {
    fn held(&self) -> Result<u64> {
        self.holdings.held()
    }
}

impl<'info> Ledger for VaultLedger<'info> {
    fn checkpoint(&mut self, config: &VestingConfig) -> Result<()> {
        let mut data = self.config.try_borrow_mut_data()?;
        let mut cursor: &mut [u8] = &mut data[..];
        config.try_serialize(&mut cursor)
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        match &self.token {
            Some(token) => {
                self.check_token_destination(token, to)?;
                let bump = [self.config_bump];
                let seeds: &[&[u8]] = &[CONFIG_SEED, self.owner.as_ref(), self.mint.as_ref(), &bump];
                token_interface::transfer_checked(
                    CpiContext::new_with_signer(
                        token.program.clone(),
                        TransferChecked {
                            from: self.holdings.vault.clone(),
                            mint: token.mint.clone(),
                            to: self.destination.clone(),
                            authority: self.config.clone(),
                        },
                        &[seeds],
                    ),
                    amount,
                    token.decimals,
                )
            }
            None => {
                require_keys_eq!(self.destination.key(), *to, VestingError::InvalidDestination);
                let config_key = self.config.key();
                let bump = [self.vault_bump];
                let seeds: &[&[u8]] = &[VAULT_SEED, config_key.as_ref(), &bump];
                system_program::transfer(
                    CpiContext::new_with_signer(
                        self.system_program.clone(),
                        system_program::Transfer {
                            from: self.holdings.vault.clone(),
                            to: self.destination.clone(),
                        },
                        &[seeds],
                    ),
                    amount,
                )
            }
        }
    }
}

/// Move funds from `funder` into the vault.
#[allow(clippy::too_many_arguments)]
pub fn deposit<'info>(
    config: &VestingConfig,
    vault: &AccountInfo<'info>,
    funder: &AccountInfo<'info>,
    source_tokens: Option<&InterfaceAccount<'info, TokenAccount>>,
    mint: Option<&InterfaceAccount<'info, Mint>>,
    token_program: Option<&Interface<'info, TokenInterface>>,
    system_program: &Program<'info, System>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, VestingError::InvalidAmount);
    match config.asset {
        AssetKind::Token => {
            let (Some(source), Some(mint), Some(program)) = (source_tokens, mint, token_program)
            else {
                return err!(VestingError::MissingTokenAccounts);
            };
            require_keys_eq!(mint.key(), config.mint, VestingError::InvalidTokenMint);
            require_keys_eq!(source.mint, config.mint, VestingError::InvalidTokenMint);
            require_keys_eq!(*vault.owner, program.key(), VestingError::InvalidTokenAccount);
            token_interface::transfer_checked(
                CpiContext::new(
                    program.to_account_info(),
                    TransferChecked {
                        from: source.to_account_info(),
                        mint: mint.to_account_info(),
                        to: vault.clone(),
                        authority: funder.clone(),
                    },
                ),
                amount,
                mint.decimals,
            )
        }
        AssetKind::Native => system_program::transfer(
            CpiContext::new(
                system_program.to_account_info(),
                system_program::Transfer {
                    from: funder.clone(),
                    to: vault.clone(),
                },
            ),
            amount,
        ),
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// In-memory vault with failure injection.
    #[derive(Default)]
    pub(crate) struct MockLedger {
        pub held: u64,
        pub fail_transfers: bool,
        pub transfers: Vec<(Pubkey, u64)>,
        /// Config as persisted by each checkpoint.
        pub checkpoints: Vec<VestingConfig>,
    }

    impl MockLedger {
        pub(crate) fn holding(held: u64) -> Self {
            Self {
                held,
                ..Default::default()
            }
        }

        pub(crate) fn paid_to(&self, who: &Pubkey) -> u64 {
            self.transfers
                .iter()
                .filter(|(to, _)| to == who)
                .map(|(_, amount)| amount)
                .sum()
        }
    }

    impl Holdings for MockLedger {
        fn held(&self) -> Result<u64> {
            Ok(self.held)
        }
    }

    impl Ledger for MockLedger {
        fn checkpoint(&mut self, config: &VestingConfig) -> Result<()> {
            self.checkpoints.push(config.clone());
            Ok(())
        }

        fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
            if self.fail_transfers || amount > self.held {
                return Err(ProgramError::InsufficientFunds.into());
            }
            self.held -= amount;
            self.transfers.push((*to, amount));
            Ok(())
        }
    }
}
