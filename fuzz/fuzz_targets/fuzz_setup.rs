use anchor_lang::solana_program::{account_info::AccountInfo, entrypoint::ProgramResult};
use anchor_lang::event::EVENT_IX_TAG_LE;
use anchor_lang::{
    AccountDeserialize, AccountSerialize, AnchorDeserialize, Discriminator, InstructionData,
    ToAccountMetas,
};
use anchor_spl::token::spl_token;
use anchor_spl::token_2022::spl_token_2022;
use anchor_spl::token_2022::spl_token_2022::extension::{transfer_fee, ExtensionType};
use kermes_staking::state::Vault;
use kermes_staking::token_ops::TokenProtocol;
use kermes_vault_share::state::ShareConfig;
use solana_program_test::*;
use solana_sdk::{
    account::Account,
    message::inner_instruction::InnerInstructions,
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::{Transaction, TransactionError},
};

// Re-export for convenience
pub use solana_program_test::{BanksClientError, ProgramTestContext};

// Custom error type for fuzzing
pub type FuzzResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Size of a Mint account without extensions
pub const MINT_LEN: usize = 82;
/// Size of a token account without extensions
pub const TOKEN_ACCOUNT_LEN: usize = 165;

/// Test environment with both programs loaded
pub struct FuzzTestEnv {
    pub staking_program_id: Pubkey,
    pub vault_share_program_id: Pubkey,
    pub context: ProgramTestContext,
}

/// An asset (or receipt) mint together with the keypair allowed to mint it
#[derive(Debug)]
pub struct MintAccounts {
    pub mint: Pubkey,
    pub mint_authority: Keypair,
    pub decimals: u8,
    pub protocol: TokenProtocol,
}

/// A receipt mint governed by the vault share program
#[derive(Debug, Clone)]
pub struct ShareMintAccounts {
    pub share_mint: Pubkey,
    pub share_config: Pubkey,
    pub mint_authority: Pubkey,
    pub authority: Pubkey,
}

/// Vault-specific accounts
#[derive(Debug, Clone)]
pub struct VaultAccounts {
    pub vault: Pubkey,
    pub vault_token_account: Pubkey,
    pub asset_mint: Pubkey,
    pub protocol: TokenProtocol,
    pub curator: Pubkey,
    pub name: String,
    /// The receipt mint bound to this vault
    pub share: ShareMintAccounts,
}

/// User token accounts for interacting with a vault
#[derive(Debug)]
pub struct UserAccounts {
    pub owner: Keypair,
    pub asset_token_account: Pubkey,
    pub share_token_account: Pubkey,
}

/// Complete setup with all accounts
pub struct CompleteSetup {
    pub asset: MintAccounts,
    pub vault: VaultAccounts,
    pub user: UserAccounts,
}

// ============================================================================
// Program Registration
// ============================================================================

fn kermes_staking_entry(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    kermes_staking::entry(program_id, accounts, data)
}

fn kermes_vault_share_entry(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    kermes_vault_share::entry(program_id, accounts, data)
}

/// Program test with both kermes programs registered natively. SPL Token and
/// Token-2022 are provided by program-test itself.
pub fn new_program_test() -> ProgramTest {
    let mut program_test = ProgramTest::default();
    program_test.prefer_bpf(false);
    program_test.add_program(
        "kermes_staking",
        kermes_staking::id(),
        processor!(kermes_staking_entry),
    );
    program_test.add_program(
        "kermes_vault_share",
        kermes_vault_share::id(),
        processor!(kermes_vault_share_entry),
    );
    program_test
}

/// Starts a program test environment
pub async fn start_program_test(program_test: ProgramTest) -> FuzzTestEnv {
    let context = program_test.start_with_context().await;

    FuzzTestEnv {
        staking_program_id: kermes_staking::id(),
        vault_share_program_id: kermes_vault_share::id(),
        context,
    }
}

/// Creates the basic program test environment with both programs loaded
pub async fn setup_program_test() -> FuzzTestEnv {
    start_program_test(new_program_test()).await
}

// ============================================================================
// Transaction Helpers
// ============================================================================

/// Signs `instructions` with the context payer plus `signers` and processes them
pub async fn send(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let mut all_signers: Vec<&Keypair> = vec![&context.payer];
    all_signers.extend_from_slice(signers);

    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &all_signers[..],
        context.last_blockhash,
    );

    context.banks_client.process_transaction(tx).await
}

/// Like [`send`], but also returns the data of every inner instruction the
/// transaction invoked. Events are emitted through self-CPI, so they show up
/// here. The transaction is simulated first to capture the inner
/// instructions and then processed for real.
pub async fn send_with_events(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> FuzzResult<(Result<(), BanksClientError>, Vec<Vec<u8>>)> {
    let mut all_signers: Vec<&Keypair> = vec![&context.payer];
    all_signers.extend_from_slice(signers);

    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &all_signers[..],
        context.last_blockhash,
    );

    let simulation = context.banks_client.simulate_transaction(tx.clone()).await?;
    let inner_data = simulation
        .simulation_details
        .and_then(|details| details.inner_instructions)
        .map(inner_instruction_data)
        .unwrap_or_default();

    let result = context.banks_client.process_transaction(tx).await;
    Ok((result, inner_data))
}

fn inner_instruction_data(inner: Vec<InnerInstructions>) -> Vec<Vec<u8>> {
    inner
        .into_iter()
        .flatten()
        .map(|inner| inner.instruction.data)
        .collect()
}

/// Transfers lamports from the context payer so `recipient` can pay rent
pub async fn fund_account(
    context: &mut ProgramTestContext,
    recipient: &Pubkey,
    lamports: u64,
) -> FuzzResult<()> {
    let ix = system_instruction::transfer(&context.payer.pubkey(), recipient, lamports);
    send(context, &[ix], &[]).await?;
    Ok(())
}

// ============================================================================
// Token Fixtures
// ============================================================================

/// Creates a new mint under the given protocol
pub async fn setup_asset_mint(
    context: &mut ProgramTestContext,
    protocol: TokenProtocol,
    decimals: u8,
) -> FuzzResult<MintAccounts> {
    let mint_authority = Keypair::new();
    let mint_keypair = Keypair::new();
    let mint = mint_keypair.pubkey();
    let token_program = protocol.program_id();

    let rent = context.banks_client.get_rent().await?;

    let create_account_ix = system_instruction::create_account(
        &context.payer.pubkey(),
        &mint,
        rent.minimum_balance(MINT_LEN),
        MINT_LEN as u64,
        &token_program,
    );

    let init_mint_ix = match protocol {
        TokenProtocol::Legacy => spl_token::instruction::initialize_mint2(
            &token_program,
            &mint,
            &mint_authority.pubkey(),
            None,
            decimals,
        )?,
        TokenProtocol::Extensions => spl_token_2022::instruction::initialize_mint2(
            &token_program,
            &mint,
            &mint_authority.pubkey(),
            None,
            decimals,
        )?,
    };

    send(context, &[create_account_ix, init_mint_ix], &[&mint_keypair]).await?;

    Ok(MintAccounts {
        mint,
        mint_authority,
        decimals,
        protocol,
    })
}

/// Creates a Token-2022 mint with `extensions`, running `init_extensions`
/// before the mint itself is initialized
async fn setup_extension_mint(
    context: &mut ProgramTestContext,
    decimals: u8,
    extensions: &[ExtensionType],
    init_extensions: impl FnOnce(&Pubkey, &Pubkey) -> FuzzResult<Vec<Instruction>>,
) -> FuzzResult<MintAccounts> {
    let mint_authority = Keypair::new();
    let mint_keypair = Keypair::new();
    let mint = mint_keypair.pubkey();
    let token_program = spl_token_2022::id();

    let space =
        ExtensionType::try_calculate_account_len::<spl_token_2022::state::Mint>(extensions)?;
    let rent = context.banks_client.get_rent().await?;

    let mut instructions = vec![system_instruction::create_account(
        &context.payer.pubkey(),
        &mint,
        rent.minimum_balance(space),
        space as u64,
        &token_program,
    )];
    instructions.extend(init_extensions(&mint, &mint_authority.pubkey())?);
    instructions.push(spl_token_2022::instruction::initialize_mint2(
        &token_program,
        &mint,
        &mint_authority.pubkey(),
        None,
        decimals,
    )?);

    send(context, &instructions, &[&mint_keypair]).await?;

    Ok(MintAccounts {
        mint,
        mint_authority,
        decimals,
        protocol: TokenProtocol::Extensions,
    })
}

/// Creates a Token-2022 mint carrying a transfer fee
pub async fn setup_transfer_fee_mint(
    context: &mut ProgramTestContext,
    decimals: u8,
    fee_basis_points: u16,
) -> FuzzResult<MintAccounts> {
    setup_extension_mint(
        context,
        decimals,
        &[ExtensionType::TransferFeeConfig],
        |mint, authority| {
            Ok(vec![transfer_fee::instruction::initialize_transfer_fee_config(
                &spl_token_2022::id(),
                mint,
                Some(authority),
                Some(authority),
                fee_basis_points,
                u64::MAX,
            )?])
        },
    )
    .await
}

/// Creates a Token-2022 mint with a permanent delegate
pub async fn setup_permanent_delegate_mint(
    context: &mut ProgramTestContext,
    decimals: u8,
    delegate: &Pubkey,
) -> FuzzResult<MintAccounts> {
    setup_extension_mint(
        context,
        decimals,
        &[ExtensionType::PermanentDelegate],
        |mint, _| {
            Ok(vec![spl_token_2022::instruction::initialize_permanent_delegate(
                &spl_token_2022::id(),
                mint,
                delegate,
            )?])
        },
    )
    .await
}

/// Size of a token account for a mint carrying a transfer fee
pub fn transfer_fee_token_account_len() -> FuzzResult<usize> {
    Ok(
        ExtensionType::try_calculate_account_len::<spl_token_2022::state::Account>(&[
            ExtensionType::TransferFeeAmount,
        ])?,
    )
}

/// Creates a token account of `len` bytes for `mint`, owned by `owner`
pub async fn create_token_account_with_len(
    context: &mut ProgramTestContext,
    protocol: TokenProtocol,
    mint: &Pubkey,
    owner: &Pubkey,
    len: usize,
) -> FuzzResult<Pubkey> {
    let token_account = Keypair::new();
    let token_program = protocol.program_id();
    let rent = context.banks_client.get_rent().await?;

    let create_ix = system_instruction::create_account(
        &context.payer.pubkey(),
        &token_account.pubkey(),
        rent.minimum_balance(len),
        len as u64,
        &token_program,
    );

    let init_ix = match protocol {
        TokenProtocol::Legacy => spl_token::instruction::initialize_account3(
            &token_program,
            &token_account.pubkey(),
            mint,
            owner,
        )?,
        TokenProtocol::Extensions => spl_token_2022::instruction::initialize_account3(
            &token_program,
            &token_account.pubkey(),
            mint,
            owner,
        )?,
    };

    send(context, &[create_ix, init_ix], &[&token_account]).await?;

    Ok(token_account.pubkey())
}

/// Creates a plain token account for `mint`, owned by `owner`
pub async fn create_token_account(
    context: &mut ProgramTestContext,
    protocol: TokenProtocol,
    mint: &Pubkey,
    owner: &Pubkey,
) -> FuzzResult<Pubkey> {
    create_token_account_with_len(context, protocol, mint, owner, TOKEN_ACCOUNT_LEN).await
}

/// Mints tokens to a token account using the mint's own authority
pub async fn mint_tokens_to_user(
    context: &mut ProgramTestContext,
    mint: &MintAccounts,
    destination: &Pubkey,
    amount: u64,
) -> FuzzResult<()> {
    let token_program = mint.protocol.program_id();
    let mint_to_ix = match mint.protocol {
        TokenProtocol::Legacy => spl_token::instruction::mint_to(
            &token_program,
            &mint.mint,
            destination,
            &mint.mint_authority.pubkey(),
            &[],
            amount,
        )?,
        TokenProtocol::Extensions => spl_token_2022::instruction::mint_to(
            &token_program,
            &mint.mint,
            destination,
            &mint.mint_authority.pubkey(),
            &[],
            amount,
        )?,
    };

    send(context, &[mint_to_ix], &[&mint.mint_authority]).await?;

    Ok(())
}

// ============================================================================
// Vault Share Program
// ============================================================================

/// Creates a receipt mint whose mint requests must be signed by `authority`
pub async fn setup_share_mint(
    context: &mut ProgramTestContext,
    authority: &Pubkey,
    decimals: u8,
) -> FuzzResult<ShareMintAccounts> {
    let share_mint_keypair = Keypair::new();
    let share_mint = share_mint_keypair.pubkey();
    let (share_config, _) = derive_share_config_pda(&share_mint);
    let (mint_authority, _) = derive_mint_authority_pda(&share_mint);

    let accounts = kermes_vault_share::accounts::InitializeShareMint {
        share_config,
        mint_authority,
        share_mint,
        authority: *authority,
        payer: context.payer.pubkey(),
        system_program: solana_sdk::system_program::ID,
        token_program: spl_token_2022::id(),
    };

    let data = kermes_vault_share::instruction::InitializeShareMint { decimals }.data();

    let ix = Instruction {
        program_id: kermes_vault_share::id(),
        accounts: accounts.to_account_metas(None),
        data,
    };

    send(context, &[ix], &[&share_mint_keypair]).await?;

    Ok(ShareMintAccounts {
        share_mint,
        share_config,
        mint_authority,
        authority: *authority,
    })
}

/// Receipt mint that only the staking authority of `vault` may mint from
pub async fn setup_vault_share_mint(
    context: &mut ProgramTestContext,
    vault: &Pubkey,
    decimals: u8,
) -> FuzzResult<ShareMintAccounts> {
    let (staking_authority, _) = derive_staking_authority_pda(vault);
    setup_share_mint(context, &staking_authority, decimals).await
}

/// Builds a direct `mint` instruction of the vault share program
pub fn mint_shares_ix(
    share: &ShareMintAccounts,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Instruction {
    let accounts = kermes_vault_share::accounts::MintShares {
        share_config: share.share_config,
        mint: share.share_mint,
        destination: *destination,
        authority: *authority,
        mint_authority: share.mint_authority,
        token_program: spl_token_2022::id(),
        event_authority: derive_event_authority_pda(&kermes_vault_share::id()),
        program: kermes_vault_share::id(),
    };

    Instruction {
        program_id: kermes_vault_share::id(),
        accounts: accounts.to_account_metas(None),
        data: kermes_vault_share::instruction::Mint { amount }.data(),
    }
}

// ============================================================================
// Staking Program
// ============================================================================

/// Builds an `initialize_vault` instruction
pub fn initialize_vault_ix(
    vault: &Pubkey,
    curator: &Pubkey,
    asset_mint: &Pubkey,
    share: &ShareMintAccounts,
    name: &str,
) -> Instruction {
    let accounts = kermes_staking::accounts::InitializeVault {
        vault: *vault,
        curator: *curator,
        asset_mint: *asset_mint,
        share_mint: share.share_mint,
        share_config: share.share_config,
        system_program: solana_sdk::system_program::ID,
        event_authority: derive_event_authority_pda(&kermes_staking::id()),
        program: kermes_staking::id(),
    };

    Instruction {
        program_id: kermes_staking::id(),
        accounts: accounts.to_account_metas(None),
        data: kermes_staking::instruction::InitializeVault {
            name: name.to_string(),
        }
        .data(),
    }
}

/// Initializes a vault for `asset` curated by `curator`, together with its
/// receipt mint and the vault-owned token account that receives stakes
pub async fn setup_vault(
    context: &mut ProgramTestContext,
    curator: &Keypair,
    asset: &MintAccounts,
    name: &str,
) -> FuzzResult<VaultAccounts> {
    // A curator setting up several vaults is only funded once
    if context.banks_client.get_balance(curator.pubkey()).await? == 0 {
        fund_account(context, &curator.pubkey(), 1_000_000_000).await?;
    }

    let (vault, _) = derive_vault_pda(&curator.pubkey(), &asset.mint, name);
    let share = setup_vault_share_mint(context, &vault, asset.decimals).await?;
    let ix = initialize_vault_ix(&vault, &curator.pubkey(), &asset.mint, &share, name);
    send(context, &[ix], &[curator]).await?;

    let vault_token_account =
        create_token_account(context, asset.protocol, &asset.mint, &vault).await?;

    Ok(VaultAccounts {
        vault,
        vault_token_account,
        asset_mint: asset.mint,
        protocol: asset.protocol,
        curator: curator.pubkey(),
        name: name.to_string(),
        share,
    })
}

/// Creates a user holding `initial_balance` of `asset` and an empty share account
pub async fn setup_user_accounts(
    context: &mut ProgramTestContext,
    asset: &MintAccounts,
    share_mint: &Pubkey,
    initial_balance: u64,
) -> FuzzResult<UserAccounts> {
    let owner = Keypair::new();

    let asset_token_account =
        create_token_account(context, asset.protocol, &asset.mint, &owner.pubkey()).await?;
    let share_token_account = create_token_account(
        context,
        TokenProtocol::Extensions,
        share_mint,
        &owner.pubkey(),
    )
    .await?;

    if initial_balance > 0 {
        mint_tokens_to_user(context, asset, &asset_token_account, initial_balance).await?;
    }

    Ok(UserAccounts {
        owner,
        asset_token_account,
        share_token_account,
    })
}

/// Accounts for a stake by `user` into `vault`, ready to be tweaked by callers
pub fn stake_accounts(vault: &VaultAccounts, user: &UserAccounts) -> kermes_staking::accounts::Stake {
    let share = &vault.share;
    let (staking_authority, _) = derive_staking_authority_pda(&vault.vault);

    kermes_staking::accounts::Stake {
        vault: vault.vault,
        staker: user.owner.pubkey(),
        staker_token_account: user.asset_token_account,
        vault_token_account: vault.vault_token_account,
        asset_mint: vault.asset_mint,
        staker_share_account: user.share_token_account,
        share_mint: share.share_mint,
        share_config: share.share_config,
        share_mint_authority: share.mint_authority,
        staking_authority,
        share_event_authority: derive_event_authority_pda(&kermes_vault_share::id()),
        asset_token_program: vault.protocol.program_id(),
        share_token_program: spl_token_2022::id(),
        vault_share_program: kermes_vault_share::id(),
        event_authority: derive_event_authority_pda(&kermes_staking::id()),
        program: kermes_staking::id(),
    }
}

/// Builds a `stake` instruction from explicit accounts
pub fn stake_ix_with(
    accounts: kermes_staking::accounts::Stake,
    amount: u64,
    decimals: u8,
) -> Instruction {
    Instruction {
        program_id: kermes_staking::id(),
        accounts: accounts.to_account_metas(None),
        data: kermes_staking::instruction::Stake { amount, decimals }.data(),
    }
}

/// Builds a `stake` instruction with the default account set
pub fn stake_ix(vault: &VaultAccounts, user: &UserAccounts, amount: u64, decimals: u8) -> Instruction {
    stake_ix_with(stake_accounts(vault, user), amount, decimals)
}

/// Submits a stake signed by the user
pub async fn stake(
    context: &mut ProgramTestContext,
    vault: &VaultAccounts,
    user: &UserAccounts,
    amount: u64,
    decimals: u8,
) -> Result<(), BanksClientError> {
    let ix = stake_ix(vault, user, amount, decimals);
    send(context, &[ix], &[&user.owner]).await
}

/// Sets up everything: asset mint + vault with its receipt mint + funded user
pub async fn setup_complete_environment(
    protocol: TokenProtocol,
    initial_user_balance: u64,
    decimals: u8,
) -> FuzzResult<(FuzzTestEnv, CompleteSetup)> {
    let mut env = setup_program_test().await;

    let asset = setup_asset_mint(&mut env.context, protocol, decimals).await?;

    let curator = Keypair::new();
    let vault = setup_vault(&mut env.context, &curator, &asset, "Vault One").await?;

    let user = setup_user_accounts(
        &mut env.context,
        &asset,
        &vault.share.share_mint,
        initial_user_balance,
    )
    .await?;

    let setup = CompleteSetup {
        asset,
        vault,
        user,
    };

    Ok((env, setup))
}

// ============================================================================
// PDA Derivation Helpers
// ============================================================================

/// Derive vault PDA
pub fn derive_vault_pda(curator: &Pubkey, asset_mint: &Pubkey, name: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            kermes_staking::VAULT_SEED,
            curator.as_ref(),
            asset_mint.as_ref(),
            name.as_bytes(),
        ],
        &kermes_staking::id(),
    )
}

/// Derive the minting credential PDA of a vault
pub fn derive_staking_authority_pda(vault: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[kermes_staking::STAKING_AUTHORITY_SEED, vault.as_ref()],
        &kermes_staking::id(),
    )
}

/// Derive the self-CPI event authority of a program
pub fn derive_event_authority_pda(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[b"__event_authority"], program_id).0
}

/// Derive share config PDA
pub fn derive_share_config_pda(share_mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[kermes_vault_share::SHARE_CONFIG_SEED, share_mint.as_ref()],
        &kermes_vault_share::id(),
    )
}

/// Derive share mint authority PDA
pub fn derive_mint_authority_pda(share_mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[kermes_vault_share::MINT_AUTHORITY_SEED, share_mint.as_ref()],
        &kermes_vault_share::id(),
    )
}

// ============================================================================
// Account State Verification Helpers
// ============================================================================

/// Fetch and return vault state
pub async fn get_vault_state(context: &mut ProgramTestContext, vault: &Pubkey) -> FuzzResult<Vault> {
    let account = context
        .banks_client
        .get_account(*vault)
        .await?
        .ok_or("Vault account not found")?;

    let vault_data = Vault::try_deserialize(&mut account.data.as_ref())?;
    Ok(vault_data)
}

/// Fetch and return a share config
pub async fn get_share_config(
    context: &mut ProgramTestContext,
    share_config: &Pubkey,
) -> FuzzResult<ShareConfig> {
    let account = context
        .banks_client
        .get_account(*share_config)
        .await?
        .ok_or("Share config account not found")?;

    let config = ShareConfig::try_deserialize(&mut account.data.as_ref())?;
    Ok(config)
}

/// Get token account balance
pub async fn get_token_balance(context: &mut ProgramTestContext, account: &Pubkey) -> FuzzResult<u64> {
    let account_data = context
        .banks_client
        .get_account(*account)
        .await?
        .ok_or("Token account not found")?;

    // Token account structure: amount is at offset 64 (u64) under both programs
    if account_data.data.len() < 72 {
        return Err("Invalid token account data".into());
    }

    let amount = u64::from_le_bytes(
        account_data.data[64..72]
            .try_into()
            .map_err(|_| "Failed to parse amount")?,
    );

    Ok(amount)
}

/// Get mint supply
pub async fn get_mint_supply(context: &mut ProgramTestContext, mint: &Pubkey) -> FuzzResult<u64> {
    let account = context
        .banks_client
        .get_account(*mint)
        .await?
        .ok_or("Mint account not found")?;

    // Mint account structure: supply is at offset 36 (u64)
    if account.data.len() < 44 {
        return Err("Invalid mint account data".into());
    }

    let supply = u64::from_le_bytes(
        account.data[36..44]
            .try_into()
            .map_err(|_| "Failed to parse supply")?,
    );

    Ok(supply)
}

/// Builds a program-owned account holding a serialized vault record, used to
/// place a copied vault at an address it was not derived for
pub fn vault_account(vault: &Vault, lamports: u64) -> FuzzResult<Account> {
    let mut data = Vec::with_capacity(Vault::LEN);
    vault.try_serialize(&mut data)?;
    data.resize(Vault::LEN, 0);

    Ok(Account {
        lamports,
        data,
        owner: kermes_staking::id(),
        executable: false,
        rent_epoch: 0,
    })
}

// ============================================================================
// Errors and Events
// ============================================================================

/// Custom program error code carried by a failed instruction, if any
pub fn custom_error_code(err: &TransactionError) -> Option<u32> {
    match err {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(*code),
        _ => None,
    }
}

/// Custom program error code of a failed banks client submission, if any
pub fn banks_error_code(err: &BanksClientError) -> Option<u32> {
    match err {
        BanksClientError::TransactionError(err)
        | BanksClientError::SimulationError { err, .. } => custom_error_code(err),
        _ => None,
    }
}

/// Asserts that a submission failed with the given Anchor error code
pub fn assert_program_error(result: Result<(), BanksClientError>, expected: u32) {
    match result {
        Ok(()) => panic!("expected program error {expected}, transaction succeeded"),
        Err(err) => assert_eq!(
            banks_error_code(&err),
            Some(expected),
            "unexpected failure: {err:?}"
        ),
    }
}

/// Decodes every Anchor event of type `T` from self-CPI instruction data
pub fn decode_events<T: AnchorDeserialize + Discriminator>(inner_data: &[Vec<u8>]) -> Vec<T> {
    inner_data
        .iter()
        .filter_map(|data| data.strip_prefix(EVENT_IX_TAG_LE))
        .filter_map(|data| data.strip_prefix(T::DISCRIMINATOR))
        .filter_map(|mut payload| T::deserialize(&mut payload).ok())
        .collect()
}
