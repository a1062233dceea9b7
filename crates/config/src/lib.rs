//! ethscope configuration
use alloy_primitives::Address;
use clap::{Parser, ValueEnum};
use url::Url;

/// Networks the provider can be pointed at. This client is fixed to a single
/// mainnet chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Network {
    /// Ethereum mainnet
    #[value(name = "eth-mainnet")]
    EthMainnet,
}

impl Network {
    /// Hostname slug used in provider endpoint URLs.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::EthMainnet => "eth-mainnet",
        }
    }

    /// JSON-RPC endpoint for this network.
    pub fn rpc_url(self, api_key: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("https://{}.g.alchemy.com/v2/{}", self.slug(), api_key))
    }

    /// NFT REST API base URL for this network.
    pub fn nft_api_url(self, api_key: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("https://{}.g.alchemy.com/nft/v2/{}", self.slug(), api_key))
    }
}

/// Chain-data provider configuration options
#[derive(Debug, Clone, Parser)]
pub struct ProviderOpts {
    /// Alchemy API key
    #[clap(long, env = "ALCHEMY_API_KEY")]
    pub api_key: String,
    /// Network selector
    #[clap(long, env = "NETWORK", value_enum, default_value = "eth-mainnet")]
    pub network: Network,
}

/// NFT display target configuration options
#[derive(Debug, Clone, Parser)]
pub struct NftOpts {
    /// Contract address of the NFT collection shown on the overview page.
    /// Must be a 0x-prefixed 40-hex-character address; startup fails otherwise.
    #[clap(long, env = "NFT_CONTRACT_ADDRESS")]
    pub contract_address: Address,
    /// Token id of the NFT shown on the overview page
    #[clap(long, env = "NFT_TOKEN_ID", default_value = "3478")]
    pub token_id: String,
}

/// API server configuration options
#[derive(Debug, Clone, Parser)]
pub struct ApiOpts {
    /// API server host
    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// API server port
    #[clap(long, env = "PORT", default_value = "3000")]
    pub port: u16,
    /// Comma separated list of allowed CORS origins
    #[clap(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

/// CLI options for ethscope
#[derive(Debug, Clone, Parser)]
pub struct Opts {
    /// Chain-data provider configuration
    #[clap(flatten)]
    pub provider: ProviderOpts,

    /// NFT display target configuration
    #[clap(flatten)]
    pub nft: NftOpts,

    /// API server configuration
    #[clap(flatten)]
    pub api: ApiOpts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Opts::command().debug_assert()
    }

    #[test]
    fn rejects_malformed_contract_address() {
        // 41 hex characters after the 0x prefix must not parse; the canonical
        // 40-character form must.
        let malformed = "0xBC4CA0EdA7647A8aB7C2061c2E118A18a936f13D1";
        assert!(malformed.parse::<Address>().is_err());
        assert!("0xBC4CA0EdA7647A8aB7C2061c2E118A18a936f13D".parse::<Address>().is_ok());
        assert!("not-an-address".parse::<Address>().is_err());
    }

    #[test]
    fn mainnet_endpoint_urls() {
        let rpc = Network::EthMainnet.rpc_url("demo-key").unwrap();
        assert_eq!(rpc.as_str(), "https://eth-mainnet.g.alchemy.com/v2/demo-key");
        let nft = Network::EthMainnet.nft_api_url("demo-key").unwrap();
        assert_eq!(nft.as_str(), "https://eth-mainnet.g.alchemy.com/nft/v2/demo-key");
    }
}
