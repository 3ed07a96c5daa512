pub const TOKEN_CONTRACT_ADDRESS_KEY: &str = "VITE_TOKEN_CONTRACT_ADDRESS";
pub const WALLET_CONNECT_PROJECT_ID_KEY: &str = "VITE_WALLET_CONNECT_PROJECT_ID";

/// Address of the token contract from the last deployment.
/// Can be replaced at build time with `TOKEN_DEPLOYED_ADDRESS`.
pub const DEFAULT_DEPLOYED_ADDRESS: &str = match option_env!("TOKEN_DEPLOYED_ADDRESS") {
    Some(address) => address,
    None => "0x5bcf71ca0ce963373d917031aafdd6d98b80b159",
};
