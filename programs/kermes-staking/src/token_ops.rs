//! Moves the staked asset through whichever token program owns it.
//!
//! Legacy SPL Token and Token-2022 accounts are not interchangeable, so the
//! caller names the program explicitly and every account involved in the
//! transfer must be owned by that program.

use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::{
    extension::{
        permanent_delegate::PermanentDelegate, transfer_fee::TransferFeeConfig,
        BaseStateWithExtensions, StateWithExtensions,
    },
    state::Mint as Token2022Mint,
};
use anchor_spl::token_interface::{Mint, TokenAccount};
use anchor_spl::{token, token_2022};

use crate::error::StakingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenProtocol {
    /// The legacy SPL Token program
    Legacy,
    /// Token-2022, which supports mint and account extensions
    Extensions,
}

impl TokenProtocol {
    pub fn from_program_id(program_id: &Pubkey) -> Result<Self> {
        match *program_id {
            token::ID => Ok(Self::Legacy),
            token_2022::ID => Ok(Self::Extensions),
            _ => err!(StakingError::InvalidTokenProgram),
        }
    }

    pub fn program_id(self) -> Pubkey {
        match self {
            Self::Legacy => token::ID,
            Self::Extensions => token_2022::ID,
        }
    }

    pub fn ensure_owns(self, account: &AccountInfo) -> Result<()> {
        require_keys_eq!(
            *account.owner,
            self.program_id(),
            StakingError::ProtocolMismatch
        );
        Ok(())
    }
}

/// Accounts taking part in one asset transfer.
pub struct AssetTransfer<'a, 'info> {
    pub source: &'a InterfaceAccount<'info, TokenAccount>,
    pub destination: &'a InterfaceAccount<'info, TokenAccount>,
    pub mint: &'a InterfaceAccount<'info, Mint>,
    pub authority: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

impl<'a, 'info> AssetTransfer<'a, 'info> {
    /// Resolves the protocol named by `token_program` and checks that the
    /// mint, source and destination all live under it.
    pub fn protocol(&self) -> Result<TokenProtocol> {
        let protocol = TokenProtocol::from_program_id(self.token_program.key)?;
        protocol.ensure_owns(&self.mint.to_account_info())?;
        protocol.ensure_owns(&self.source.to_account_info())?;
        protocol.ensure_owns(&self.destination.to_account_info())?;
        Ok(protocol)
    }

    /// Validates and performs the transfer of `amount` from source to
    /// destination.
    pub fn execute(self, amount: u64, expected_decimals: u8) -> Result<()> {
        let protocol = self.protocol()?;

        require!(
            self.mint.decimals == expected_decimals,
            StakingError::DecimalsMismatch
        );
        if protocol == TokenProtocol::Extensions {
            ensure_conserving_mint(&self.mint.to_account_info())?;
        }
        require!(
            self.source.amount >= amount,
            StakingError::InsufficientBalance
        );

        match protocol {
            TokenProtocol::Legacy => token::transfer_checked(
                CpiContext::new(
                    self.token_program,
                    token::TransferChecked {
                        from: self.source.to_account_info(),
                        mint: self.mint.to_account_info(),
                        to: self.destination.to_account_info(),
                        authority: self.authority,
                    },
                ),
                amount,
                expected_decimals,
            ),
            TokenProtocol::Extensions => token_2022::transfer_checked(
                CpiContext::new(
                    self.token_program,
                    token_2022::TransferChecked {
                        from: self.source.to_account_info(),
                        mint: self.mint.to_account_info(),
                        to: self.destination.to_account_info(),
                        authority: self.authority,
                    },
                ),
                amount,
                expected_decimals,
            ),
        }
    }
}

/// Rejects Token-2022 mints whose extensions let the vault receive less than
/// the staked amount or let a third party move funds out of it.
fn ensure_conserving_mint(mint: &AccountInfo) -> Result<()> {
    let data = mint.try_borrow_data()?;
    let state = StateWithExtensions::<Token2022Mint>::unpack(&data)?;

    if let Ok(fee_config) = state.get_extension::<TransferFeeConfig>() {
        let older = u16::from(fee_config.older_transfer_fee.transfer_fee_basis_points);
        let newer = u16::from(fee_config.newer_transfer_fee.transfer_fee_basis_points);
        require!(
            older == 0 && newer == 0,
            StakingError::UnsupportedMintExtension
        );
    }

    if let Ok(delegate) = state.get_extension::<PermanentDelegate>() {
        require!(
            Option::<Pubkey>::from(delegate.delegate).is_none(),
            StakingError::UnsupportedMintExtension
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_staking_error(result: Result<()>, expected: StakingError) {
        let err = result.unwrap_err();
        assert_eq!(
            ProgramError::from(err),
            ProgramError::Custom(expected.into())
        );
    }

    #[test]
    fn protocol_is_resolved_from_program_id() {
        assert_eq!(
            TokenProtocol::from_program_id(&token::ID).unwrap(),
            TokenProtocol::Legacy
        );
        assert_eq!(
            TokenProtocol::from_program_id(&token_2022::ID).unwrap(),
            TokenProtocol::Extensions
        );
        assert_eq!(TokenProtocol::Legacy.program_id(), token::ID);
        assert_eq!(TokenProtocol::Extensions.program_id(), token_2022::ID);
    }

    #[test]
    fn unknown_program_is_rejected() {
        let result = TokenProtocol::from_program_id(&Pubkey::new_unique()).map(|_| ());
        assert_staking_error(result, StakingError::InvalidTokenProgram);
    }

    #[test]
    fn ownership_is_checked_against_selected_protocol() {
        let key = Pubkey::new_unique();
        let owner = token_2022::ID;
        let mut lamports = 0;
        let mut data = vec![];
        let account = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &owner,
            false,
            0,
        );

        assert!(TokenProtocol::Extensions.ensure_owns(&account).is_ok());
        assert_staking_error(
            TokenProtocol::Legacy.ensure_owns(&account),
            StakingError::ProtocolMismatch,
        );
    }
}
