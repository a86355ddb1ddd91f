//! Constants used in the deploy scripts

use alloy_primitives::I256;

/// The directory containing per-chain settings files, relative to the base directory
pub const CONFIGS_DIR: &str = "configs";

/// The directory containing per-chain deployment state files, relative to the base directory
pub const DEPLOYMENTS_DIR: &str = "deployments";

/// The subdirectory of [`DEPLOYMENTS_DIR`] used for debug (forked) deployments
pub const DEBUG_DEPLOYMENTS_DIR: &str = "debug";

/// The directory containing compiled contract artifacts, relative to the base directory
pub const CONTRACTS_DIR: &str = "contracts";

/// The name of the governance check skipped when admins come from the settings file
pub const XGOV_CHECK: &str = "xgov";

/// The gauge type registered with the metaregistry until a real gauge type exists
pub const GAUGE_TYPE_PLACEHOLDER: I256 = I256::MINUS_ONE;

// -------------------------
// | Deployment state keys |
// -------------------------

/// The ownership agent key in the deployment state file
pub const OWNERSHIP_AGENT_KEY: &str = "governance.agent.ownership";

/// The parameter agent key in the deployment state file
pub const PARAMETER_AGENT_KEY: &str = "governance.agent.parameter";

/// The emergency agent key in the deployment state file
pub const EMERGENCY_AGENT_KEY: &str = "governance.agent.emergency";

/// The xgov relayer key in the deployment state file
pub const RELAYER_KEY: &str = "governance.relayer";

/// The DAO vault key in the deployment state file
pub const DAO_VAULT_KEY: &str = "governance.vault";

/// The gauge implementation key in the deployment state file
pub const GAUGE_IMPLEMENTATION_KEY: &str = "gauge.implementation";

/// The gauge factory key in the deployment state file
pub const GAUGE_FACTORY_KEY: &str = "gauge.factory";

/// The address provider key in the deployment state file
pub const ADDRESS_PROVIDER_KEY: &str = "registries.address_provider";

/// The metaregistry key in the deployment state file
pub const METAREGISTRY_KEY: &str = "registries.metaregistry";

/// The router key in the deployment state file
pub const ROUTER_KEY: &str = "helpers.router";

/// The deposit-and-stake zap key in the deployment state file
pub const DEPOSIT_AND_STAKE_ZAP_KEY: &str = "helpers.deposit_and_stake_zap";

/// The stableswap meta zap key in the deployment state file
pub const META_ZAP_KEY: &str = "helpers.meta_zap";

/// The rate provider key in the deployment state file
pub const RATE_PROVIDER_KEY: &str = "helpers.rate_provider";

/// The stableswap math key in the deployment state file
pub const STABLESWAP_MATH_KEY: &str = "amm.stableswap.math";

/// The stableswap views key in the deployment state file
pub const STABLESWAP_VIEWS_KEY: &str = "amm.stableswap.views";

/// The stableswap plain pool implementation key in the deployment state file
pub const STABLESWAP_IMPLEMENTATION_KEY: &str = "amm.stableswap.implementation";

/// The stableswap metapool implementation key in the deployment state file
pub const STABLESWAP_META_IMPLEMENTATION_KEY: &str = "amm.stableswap.meta_implementation";

/// The stableswap factory key in the deployment state file
pub const STABLESWAP_FACTORY_KEY: &str = "amm.stableswap.factory";

/// The tricrypto math key in the deployment state file
pub const TRICRYPTO_MATH_KEY: &str = "amm.tricrypto.math";

/// The tricrypto views key in the deployment state file
pub const TRICRYPTO_VIEWS_KEY: &str = "amm.tricrypto.views";

/// The tricrypto pool implementation key in the deployment state file
pub const TRICRYPTO_IMPLEMENTATION_KEY: &str = "amm.tricrypto.implementation";

/// The tricrypto factory key in the deployment state file
pub const TRICRYPTO_FACTORY_KEY: &str = "amm.tricrypto.factory";

/// The twocrypto math key in the deployment state file
pub const TWOCRYPTO_MATH_KEY: &str = "amm.twocrypto.math";

/// The twocrypto views key in the deployment state file
pub const TWOCRYPTO_VIEWS_KEY: &str = "amm.twocrypto.views";

/// The twocrypto pool implementation key in the deployment state file
pub const TWOCRYPTO_IMPLEMENTATION_KEY: &str = "amm.twocrypto.implementation";

/// The twocrypto factory key in the deployment state file
pub const TWOCRYPTO_FACTORY_KEY: &str = "amm.twocrypto.factory";

/// The infra contracts whose ownership is transferred to the DAO after deployment
pub const INFRA_OWNERSHIP_KEYS: [&str; 7] = [
    GAUGE_FACTORY_KEY,
    ADDRESS_PROVIDER_KEY,
    METAREGISTRY_KEY,
    STABLESWAP_FACTORY_KEY,
    TRICRYPTO_FACTORY_KEY,
    TWOCRYPTO_FACTORY_KEY,
    RATE_PROVIDER_KEY,
];

// ------------------
// | Artifact names |
// ------------------

/// The artifact name of the governance agent contract
pub const AGENT_ARTIFACT: &str = "governance/agent";

/// The artifact name of the optimism-style xgov relayer
pub const RELAYER_ARTIFACT_OPTIMISM: &str = "governance/relayer_optimism";

/// The artifact name of the arbitrum-style xgov relayer
pub const RELAYER_ARTIFACT_ARBITRUM: &str = "governance/relayer_arbitrum";

/// The artifact name of the polygon-zkevm-style xgov relayer
pub const RELAYER_ARTIFACT_POLYGON_ZKEVM: &str = "governance/relayer_polygon_zkevm";

/// The artifact name of the DAO vault contract
pub const DAO_VAULT_ARTIFACT: &str = "governance/vault";

/// The artifact name of the liquidity gauge implementation
pub const GAUGE_IMPLEMENTATION_ARTIFACT: &str = "gauge/implementation";

/// The artifact name of the reward-only gauge factory
pub const GAUGE_FACTORY_ARTIFACT: &str = "gauge/factory";

/// The artifact name of the address provider
pub const ADDRESS_PROVIDER_ARTIFACT: &str = "registries/address_provider";

/// The artifact name of the metaregistry
pub const METAREGISTRY_ARTIFACT: &str = "registries/metaregistry";

/// The artifact name of the exchange router
pub const ROUTER_ARTIFACT: &str = "helpers/router";

/// The artifact name of the deposit-and-stake zap
pub const DEPOSIT_AND_STAKE_ZAP_ARTIFACT: &str = "helpers/deposit_and_stake_zap";

/// The artifact name of the stableswap meta zap
pub const META_ZAP_ARTIFACT: &str = "helpers/stable_swap_meta_zap";

/// The artifact name of the spot rate provider
pub const RATE_PROVIDER_ARTIFACT: &str = "helpers/rate_provider";

/// The artifact name of the test ERC20 used on devnets
pub const TEST_ERC20_ARTIFACT: &str = "test/erc20";

/// The artifact names of the stableswap infra, in deploy order:
/// math, views, plain implementation, metapool implementation, factory
pub const STABLESWAP_ARTIFACTS: [&str; 5] = [
    "amm/stableswap/math",
    "amm/stableswap/views",
    "amm/stableswap/implementation",
    "amm/stableswap/meta_implementation",
    "amm/stableswap/factory",
];

/// The artifact names of the tricrypto infra, in deploy order:
/// math, views, implementation, factory
pub const TRICRYPTO_ARTIFACTS: [&str; 4] = [
    "amm/tricrypto/math",
    "amm/tricrypto/views",
    "amm/tricrypto/implementation",
    "amm/tricrypto/factory",
];

/// The artifact names of the twocrypto infra, in deploy order:
/// math, views, implementation, factory
pub const TWOCRYPTO_ARTIFACTS: [&str; 4] = [
    "amm/twocrypto/math",
    "amm/twocrypto/views",
    "amm/twocrypto/implementation",
    "amm/twocrypto/factory",
];

// ------------------------
// | Address provider ids |
// ------------------------

/// The address provider id of the exchange router
pub const ROUTER_ID: u64 = 2;

/// The address provider id of the metaregistry
pub const METAREGISTRY_ID: u64 = 7;

/// The address provider id of the tricrypto factory
pub const TRICRYPTO_FACTORY_ID: u64 = 11;

/// The address provider id of the stableswap factory
pub const STABLESWAP_FACTORY_ID: u64 = 12;

/// The address provider id of the twocrypto factory
pub const TWOCRYPTO_FACTORY_ID: u64 = 13;

/// The address provider id of the spot rate provider
pub const RATE_PROVIDER_ID: u64 = 18;

/// The address provider id of the gauge factory
pub const GAUGE_FACTORY_ID: u64 = 19;
