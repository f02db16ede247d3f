#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use vestra_ledger::{AllocationAddresses, AllocationPlan, FaucetSettings, Ledger, LedgerParams};
use vestra_types::{Address, Timestamp, TokenAmount};

#[derive(Arbitrary, Debug)]
enum Op {
    Mint { caller: u8, to: u8, amount: u64 },
    Burn { caller: u8, amount: u64 },
    Transfer { caller: u8, to: u8, amount: u64 },
    AddVesting { caller: u8, beneficiary: u8, amount: u64, cliff: u32, duration: u32 },
    Release { caller: u8 },
    SetAirdrop { caller: u8, recipients: Vec<u8>, amounts: Vec<u64> },
    ClaimAirdrop { caller: u8 },
    Faucet { caller: u8 },
    UpdateFaucet { caller: u8, drip: u64, cool_down: u32 },
    InitTokenomics { caller: u8 },
    TransferOwnership { caller: u8, new_owner: u8 },
    Advance { secs: u32 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    cap: u64,
    initial: u64,
    ops: Vec<Op>,
}

fn account(i: u8) -> Address {
    // Slot 0 is the initial owner.
    if i % 8 == 0 {
        Address::new("vx_owner")
    } else {
        Address::new(format!("vx_acct_{}", i % 8))
    }
}

// Drive arbitrary operation sequences and check the cap and the balance sum
// after every step.
fuzz_target!(|input: Input| {
    let Ok(mut ledger) = Ledger::new(LedgerParams {
        owner: account(0),
        asset: Address::new("vx_vestra"),
        initial_supply: TokenAmount::new(input.initial as u128),
        max_supply: TokenAmount::new(input.cap as u128),
        faucet: FaucetSettings::default(),
        allocation: AllocationPlan::standard(&AllocationAddresses::default()),
    }) else {
        return;
    };

    let mut now = 0u64;
    for op in input.ops {
        let at = Timestamp::new(now);
        let _ = match op {
            Op::Mint { caller, to, amount } => {
                ledger.mint(&account(caller), &account(to), TokenAmount::new(amount as u128))
            }
            Op::Burn { caller, amount } => {
                ledger.burn(&account(caller), TokenAmount::new(amount as u128))
            }
            Op::Transfer { caller, to, amount } => ledger.transfer(
                &account(caller),
                &account(to),
                TokenAmount::new(amount as u128),
            ),
            Op::AddVesting { caller, beneficiary, amount, cliff, duration } => ledger.add_vesting(
                &account(caller),
                &account(beneficiary),
                TokenAmount::new(amount as u128),
                cliff as u64,
                duration as u64,
                at,
            ),
            Op::Release { caller } => ledger.release_vested_tokens(&account(caller), at).map(drop),
            Op::SetAirdrop { caller, recipients, amounts } => {
                let recipients: Vec<Address> = recipients.into_iter().map(account).collect();
                let amounts: Vec<TokenAmount> =
                    amounts.into_iter().map(|a| TokenAmount::new(a as u128)).collect();
                ledger.set_airdrop_list(&account(caller), &recipients, &amounts)
            }
            Op::ClaimAirdrop { caller } => ledger.claim_airdrop(&account(caller)).map(drop),
            Op::Faucet { caller } => ledger.faucet_mint(&account(caller), at).map(drop),
            Op::UpdateFaucet { caller, drip, cool_down } => ledger.update_faucet_settings(
                &account(caller),
                TokenAmount::new(drip as u128),
                cool_down as u64,
            ),
            Op::InitTokenomics { caller } => ledger.init_tokenomics(&account(caller), at),
            Op::TransferOwnership { caller, new_owner } => {
                ledger.transfer_ownership(&account(caller), account(new_owner))
            }
            Op::Advance { secs } => {
                now = now.saturating_add(secs as u64);
                Ok(())
            }
        };

        assert!(ledger.total_supply() <= ledger.max_supply());
        let sum = ledger
            .balances()
            .fold(0u128, |acc, (_, b)| acc + b.raw());
        assert_eq!(sum, ledger.total_supply().raw());
        for beneficiary in ledger.get_all_vesting_addresses() {
            if let Some(schedule) = ledger.vesting_schedule(beneficiary) {
                assert!(schedule.released <= schedule.total_allocated);
            }
        }
    }
});
