//! Signing wallets loaded from a plain-text secrets file.

use std::{fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use solana_sdk::signature::{keypair_from_seed, Keypair, Signer};

/// Read one base58 secret key per line. Blank lines are ignored; any other
/// line that does not decode to a keypair fails the whole load.
pub fn load_wallets<P: AsRef<Path>>(path: P) -> Result<Vec<Keypair>> {
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading secrets file {:?}", path.as_ref()))?;

    let wallets = parse_wallets(&raw)
        .with_context(|| format!("parsing secrets file {:?}", path.as_ref()))?;
    if wallets.is_empty() {
        bail!("secrets file {:?} holds no keys", path.as_ref());
    }
    Ok(wallets)
}

/// Same rules as [`load_wallets`], minus the file and emptiness checks.
pub fn parse_wallets(raw: &str) -> Result<Vec<Keypair>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| decode_keypair(line.trim()).with_context(|| format!("line {}", idx + 1)))
        .collect()
}

/// Never echo the secret itself into an error.
fn decode_keypair(encoded: &str) -> Result<Keypair> {
    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| anyhow!("decoding base58 key: {e}"))?;
    let keypair =
        Keypair::from_bytes(&bytes).map_err(|_| anyhow!("not a 64-byte ed25519 keypair"))?;

    // `from_bytes` trusts the trailing public half; it must match the seed.
    let derived = keypair_from_seed(&bytes[..32])
        .map_err(|_| anyhow!("secret half is not a valid ed25519 seed"))?;
    if derived.pubkey() != keypair.pubkey() {
        bail!("public key half does not match the secret key");
    }
    Ok(keypair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn encoded(kp: &Keypair) -> String {
        bs58::encode(kp.to_bytes()).into_string()
    }

    #[test]
    fn loads_keys_in_file_order() {
        let a = Keypair::new();
        let b = Keypair::new();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  {}  ", encoded(&a)).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{}", encoded(&b)).unwrap();

        let wallets = load_wallets(file.path()).unwrap();
        let keys: Vec<_> = wallets.iter().map(|w| w.pubkey()).collect();
        assert_eq!(keys, vec![a.pubkey(), b.pubkey()]);
    }

    #[test]
    fn one_bad_line_fails_everything() {
        let good = encoded(&Keypair::new());
        let raw = format!("{good}\nnot-base58-0OIl\n{good}\n");

        let err = parse_wallets(&raw).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn short_key_is_rejected_without_leaking_it() {
        let short = bs58::encode([7u8; 32]).into_string();
        let err = parse_wallets(&short).unwrap_err();
        assert!(!format!("{err:#}").contains(&short));
    }

    #[test]
    fn mismatched_public_half_is_rejected() {
        let a = Keypair::new();
        let b = Keypair::new();
        let mut spliced = a.to_bytes();
        spliced[32..].copy_from_slice(&b.to_bytes()[32..]);
        let line = bs58::encode(spliced).into_string();

        let raw = format!("{}\n{line}\n", encoded(&Keypair::new()));
        let err = parse_wallets(&raw).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("line 2"));
        assert!(msg.contains("does not match"));
        assert!(!msg.contains(&line));
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(load_wallets(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_wallets("/nonexistent/privates.txt").is_err());
    }
}
