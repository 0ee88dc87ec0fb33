//! Block-explorer links.

/// Explorer base URLs keyed by decimal chain id.
pub const CHAIN_EXPLORERS: [(&str, &str); 19] = [
    ("1", "https://etherscan.io"),
    ("3", "https://ropsten.etherscan.io"),
    ("4", "https://rinkeby.etherscan.io"),
    ("5", "https://goerli.etherscan.io"),
    ("42", "https://kovan.etherscan.io"),
    ("56", "https://bscscan.com"),
    ("97", "https://testnet.bscscan.com"),
    ("137", "https://polygonscan.com"),
    ("80001", "https://mumbai.polygonscan.com"),
    ("42161", "https://arbiscan.io"),
    ("421611", "https://testnet.arbiscan.io"),
    ("10", "https://optimistic.etherscan.io"),
    ("69", "https://kovan-optimistic.etherscan.io"),
    ("43114", "https://snowtrace.io"),
    ("43113", "https://testnet.snowtrace.io"),
    ("250", "https://ftmscan.com"),
    ("4002", "https://testnet.ftmscan.com"),
    ("100", "https://gnosisscan.io"),
    ("11155111", "https://sepolia.etherscan.io"),
];

/// Mainnet, used for unknown chains.
pub const DEFAULT_EXPLORER: &str = "https://etherscan.io";

/// Decimal form of a chain id. `0x` hex ids are converted; anything that
/// does not parse is returned trimmed.
pub fn normalize_chain_id(chain_id: &str) -> String {
    let chain_id = chain_id.trim();
    chain_id
        .strip_prefix("0x")
        .or_else(|| chain_id.strip_prefix("0X"))
        .and_then(|hex| u64::from_str_radix(hex, 16).ok())
        .map_or_else(|| chain_id.to_string(), |id| id.to_string())
}

/// Explorer base URL for a chain; unknown and absent chains use mainnet.
pub fn explorer_base_url(chain_id: Option<&str>) -> &'static str {
    let Some(chain_id) = chain_id else {
        return DEFAULT_EXPLORER;
    };
    let chain_id = normalize_chain_id(chain_id);
    CHAIN_EXPLORERS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map_or(DEFAULT_EXPLORER, |(_, url)| url)
}

/// Link to a transaction.
pub fn tx_url(hash: &str, chain_id: Option<&str>) -> String {
    format!("{}/tx/{hash}", explorer_base_url(chain_id))
}

/// Link to an address.
pub fn address_url(address: &str, chain_id: Option<&str>) -> String {
    format!("{}/address/{address}", explorer_base_url(chain_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chains() {
        assert_eq!(explorer_base_url(Some("137")), "https://polygonscan.com");
        assert_eq!(explorer_base_url(Some("11155111")), "https://sepolia.etherscan.io");
        assert_eq!(explorer_base_url(Some("0x89")), "https://polygonscan.com");
        assert_eq!(explorer_base_url(Some("0xa4b1")), "https://arbiscan.io");
    }

    #[test]
    fn test_unknown_chain_falls_back_to_mainnet() {
        assert_eq!(explorer_base_url(Some("999999")), DEFAULT_EXPLORER);
        assert_eq!(explorer_base_url(Some("0xzz")), DEFAULT_EXPLORER);
        assert_eq!(explorer_base_url(None), DEFAULT_EXPLORER);
    }

    #[test]
    fn test_urls() {
        assert_eq!(tx_url("0xabc", Some("0x1")), "https://etherscan.io/tx/0xabc");
        assert_eq!(address_url("0xdef", Some("56")), "https://bscscan.com/address/0xdef");
    }

    #[test]
    fn test_table_is_unique() {
        for (i, (a, _)) in CHAIN_EXPLORERS.iter().enumerate() {
            assert!(CHAIN_EXPLORERS[i + 1..].iter().all(|(b, _)| a != b), "duplicate {a}");
        }
    }
}
