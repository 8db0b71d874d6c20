#![no_main]

use std::collections::HashSet;

use arbitrary::Arbitrary;
use fuzz_helpers::*;
use kermes_staking::error::StakingError;
use kermes_staking::token_ops::TokenProtocol;
use libfuzzer_sys::fuzz_target;

/// One stake attempt in a fuzzed sequence
#[derive(Debug, Clone, Arbitrary)]
struct StakeStep {
    /// Amount to stake (fuzzed, zero allowed)
    amount: u64,
    /// Submit decimals that disagree with the asset mint
    wrong_decimals: bool,
}

/// Fuzzable input for a sequence of stakes into one vault
#[derive(Debug, Clone, Arbitrary)]
struct StakeFuzzInput {
    /// Stake through Token-2022 instead of the legacy token program
    use_token_2022: bool,
    /// Asset decimals (for setup)
    decimals: u8,
    /// Initial user balance (for setup)
    initial_balance: u64,
    /// Stakes to submit in order
    steps: Vec<StakeStep>,
}

const MAX_STEPS: usize = 8;

/// Execute a single fuzz iteration over a stake sequence
async fn fuzz_stake_once(input: StakeFuzzInput) -> Result<(), Box<dyn std::error::Error>> {
    let protocol = if input.use_token_2022 {
        TokenProtocol::Extensions
    } else {
        TokenProtocol::Legacy
    };
    let decimals = input.decimals % 19; // Token decimals are typically 0-18

    let (mut env, setup) =
        match setup_complete_environment(protocol, input.initial_balance, decimals).await {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Setup failed: {}", e);
                return Ok(()); // Skip this iteration if setup fails
            }
        };

    let mut expected_total: u64 = 0;
    let mut submitted = HashSet::new();

    for step in input.steps.iter().take(MAX_STEPS) {
        let step_decimals = if step.wrong_decimals {
            decimals.wrapping_add(1)
        } else {
            decimals
        };

        // Identical transactions under one blockhash are rejected as duplicates
        if !submitted.insert((step.amount, step_decimals)) {
            env.context.last_blockhash = env.context.get_new_latest_blockhash().await?;
        }

        let user_balance_before =
            get_token_balance(&mut env.context, &setup.user.asset_token_account).await?;
        let vault_balance_before =
            get_token_balance(&mut env.context, &setup.vault.vault_token_account).await?;
        let user_shares_before =
            get_token_balance(&mut env.context, &setup.user.share_token_account).await?;

        let result = stake(
            &mut env.context,
            &setup.vault,
            &setup.user,
            step.amount,
            step_decimals,
        )
        .await;

        let user_balance_after =
            get_token_balance(&mut env.context, &setup.user.asset_token_account).await?;
        let vault_balance_after =
            get_token_balance(&mut env.context, &setup.vault.vault_token_account).await?;
        let user_shares_after =
            get_token_balance(&mut env.context, &setup.user.share_token_account).await?;

        match result {
            Ok(()) => {
                expected_total = expected_total
                    .checked_add(step.amount)
                    .ok_or("accounted total overflowed")?;

                assert_eq!(
                    user_balance_after,
                    user_balance_before - step.amount,
                    "User balance should decrease by exact stake amount"
                );
                assert_eq!(
                    vault_balance_after,
                    vault_balance_before + step.amount,
                    "Vault balance should increase by exact stake amount"
                );
                assert_eq!(
                    user_shares_after,
                    user_shares_before + step.amount,
                    "Shares must be issued 1:1 with the staked amount"
                );

                println!(
                    "✓ PASS - stake={}, vault: {}→{}, total deposited: {}",
                    step.amount, vault_balance_before, vault_balance_after, expected_total
                );
            }
            Err(e) => {
                println!("✗ Stake failed: amount={}, error={:?}", step.amount, e);

                // Failed stakes must leave every balance untouched
                assert_eq!(user_balance_after, user_balance_before);
                assert_eq!(vault_balance_after, vault_balance_before);
                assert_eq!(user_shares_after, user_shares_before);

                let acceptable_errors = [
                    u32::from(StakingError::InvalidAmount),
                    u32::from(StakingError::DecimalsMismatch),
                    u32::from(StakingError::InsufficientBalance),
                ];

                let is_acceptable = banks_error_code(&e)
                    .map(|code| acceptable_errors.contains(&code))
                    .unwrap_or(false);

                if !is_acceptable {
                    panic!("Unexpected error during stake: {:?}\nInput: {:?}", e, input);
                }
            }
        }

        // CONSERVATION: recorded deposits equal the sum of successful stakes
        let vault_state = get_vault_state(&mut env.context, &setup.vault.vault).await?;
        assert_eq!(
            vault_state.total_deposited, expected_total,
            "CRITICAL: total_deposited diverged from the sum of successful stakes"
        );

        // ISSUANCE: receipt supply never exceeds what was deposited
        let share_supply = get_mint_supply(&mut env.context, &setup.vault.share.share_mint).await?;
        assert_eq!(
            share_supply, expected_total,
            "CRITICAL: receipt supply diverged from deposits"
        );

        // TOKEN CONSERVATION: nothing created or destroyed between user and vault
        assert_eq!(
            user_balance_after + vault_balance_after,
            input.initial_balance,
            "CRITICAL: Token conservation violated"
        );
    }

    Ok(())
}

fuzz_target!(|input: StakeFuzzInput| {
    // Run the async fuzz test
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        if let Err(e) = fuzz_stake_once(input).await {
            eprintln!("Fuzz iteration failed: {}", e);
        }
    });
});
