//! On-chain interfaces of the contracts touched during deployment.
//!
//! Only the methods the scripts actually call are declared; the full ABIs
//! live with the compiled artifacts.

use alloy::sol;

sol! {
    /// Ownership surface shared by the infra contracts
    #[sol(rpc)]
    interface IOwnable {
        function owner() external view returns (address);
        function transfer_ownership(address new_owner) external;
    }

    /// The on-chain directory mapping protocol component ids to addresses
    #[sol(rpc)]
    interface IAddressProvider {
        function get_address(uint256 id) external view returns (address);
        function add_new_id(uint256 id, address addr, string description) external;
        function update_address(uint256 id, address addr) external;
    }

    /// The registry-of-registries aggregating the AMM factories
    #[sol(rpc)]
    interface IMetaRegistry {
        function add_registry_handler(address handler) external;
    }

    /// The reward-only liquidity gauge factory
    #[sol(rpc)]
    interface IGaugeFactory {
        function set_implementation(address implementation) external;
    }

    /// The stableswap pool factory
    #[sol(rpc)]
    interface IStableswapFactory {
        function set_math_implementation(address math) external;
        function set_views_implementation(address views) external;
        function set_pool_implementations(uint256 index, address implementation) external;
        function set_metapool_implementations(uint256 index, address implementation) external;
    }

    /// The factory shared by the tricrypto and twocrypto pool families
    #[sol(rpc)]
    interface ICryptoFactory {
        function set_math_implementation(address math) external;
        function set_views_implementation(address views) external;
        function set_pool_implementation(address implementation, uint256 index) external;
        function pool_count() external view returns (uint256);
        function pool_list(uint256 index) external view returns (address);
        function deploy_pool(
            string name,
            string symbol,
            address[2] coins,
            uint256 implementation_id,
            uint256 a,
            uint256 gamma,
            uint256 mid_fee,
            uint256 out_fee,
            uint256 fee_gamma,
            uint256 allowed_extra_profit,
            uint256 adjustment_step,
            uint256 ma_exp_time,
            uint256 initial_price
        ) external returns (address);
    }

    /// A two-coin crypto pool, as deployed by the twocrypto factory
    #[sol(rpc)]
    interface ICryptoPool {
        function coins(uint256 index) external view returns (address);
        function add_liquidity(uint256[2] amounts, uint256 min_mint_amount) external returns (uint256);
        function exchange(uint256 i, uint256 j, uint256 dx, uint256 min_dy) external returns (uint256);
        function balanceOf(address account) external view returns (uint256);
    }

    /// The mintable ERC20 used for devnet test pools
    #[sol(rpc)]
    interface TestERC20 {
        function mint(address to, uint256 amount) external;
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
    }
}
