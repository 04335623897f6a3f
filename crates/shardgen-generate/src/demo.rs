use shardgen_core::{GenError, InitialAccount};
use shardgen_crypto::PubkeyConverter;
use tracing::info;

/// Well-known addresses of a demo deployment. They replace the addresses of
/// the last four generated accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAddresses {
    pub faucet: String,
    pub web: String,
    pub controller: String,
    pub sponsor: String,
}

/// Overwrite the addresses of the last four accounts with `demo`, in the
/// order faucet, web, controller, sponsor. Amounts are left as they are.
pub fn apply_demo_addresses(
    accounts: &mut [InitialAccount],
    demo: &DemoAddresses,
    converter: &dyn PubkeyConverter,
) -> Result<(), GenError> {
    let replacements = [&demo.faucet, &demo.web, &demo.controller, &demo.sponsor];
    if accounts.len() < replacements.len() {
        return Err(GenError::InvalidValue { field: "number of accounts for demo addresses" });
    }
    for address in replacements {
        converter.decode(address)?;
    }

    let start = accounts.len() - replacements.len();
    for (account, address) in accounts[start..].iter_mut().zip(replacements) {
        account.address = address.clone();
    }
    info!(first_index = start, "applied demo addresses");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use shardgen_core::DelegationData;
    use shardgen_crypto::Bech32PubkeyConverter;

    fn accounts(n: usize) -> Vec<InitialAccount> {
        (0..n)
            .map(|i| InitialAccount::new(format!("acc{i}"), BigInt::from(i), BigInt::from(0), DelegationData::none()))
            .collect()
    }

    fn demo(conv: &Bech32PubkeyConverter) -> DemoAddresses {
        let addr = |b: u8| conv.encode(&[b; 32]).unwrap();
        DemoAddresses {
            faucet: addr(1),
            web: addr(2),
            controller: addr(3),
            sponsor: addr(4),
        }
    }

    #[test]
    fn replaces_last_four() {
        let conv = Bech32PubkeyConverter::new(32, "erd").unwrap();
        let demo = demo(&conv);
        let mut accs = accounts(6);
        apply_demo_addresses(&mut accs, &demo, &conv).unwrap();

        assert_eq!(accs[0].address, "acc0");
        assert_eq!(accs[1].address, "acc1");
        assert_eq!(accs[2].address, demo.faucet);
        assert_eq!(accs[3].address, demo.web);
        assert_eq!(accs[4].address, demo.controller);
        assert_eq!(accs[5].address, demo.sponsor);
        assert_eq!(accs[5].balance, BigInt::from(5));
    }

    #[test]
    fn too_few_accounts() {
        let conv = Bech32PubkeyConverter::new(32, "erd").unwrap();
        let mut accs = accounts(3);
        assert!(matches!(
            apply_demo_addresses(&mut accs, &demo(&conv), &conv),
            Err(GenError::InvalidValue { .. })
        ));
    }

    #[test]
    fn undecodable_address_leaves_accounts_untouched() {
        let conv = Bech32PubkeyConverter::new(32, "erd").unwrap();
        let mut bad = demo(&conv);
        bad.sponsor = "garbage".into();
        let mut accs = accounts(4);
        assert!(matches!(
            apply_demo_addresses(&mut accs, &bad, &conv),
            Err(GenError::PubKeyConversion(_))
        ));
        assert_eq!(accs[0].address, "acc0");
    }
}
