use alloy_primitives::{address, Address};

#[non_exhaustive]
pub struct TokenAddressEth;

impl TokenAddressEth {
    pub const WETH: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
    pub const USDC: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
    pub const USDT: Address = address!("dac17f958d2ee523a2206206994597c13d831ec7");
    pub const DAI: Address = address!("6b175474e89094c44da98b954eedeac495271d0f");
    pub const WBTC: Address = address!("2260fac5e5542a773aa44fbcfedf7c193bc2c599");
}

#[non_exhaustive]
pub struct ChainId;

impl ChainId {
    pub const ETHEREUM: u64 = 1;
    pub const OPTIMISM: u64 = 10;
    pub const BSC: u64 = 56;
    pub const POLYGON: u64 = 137;
    pub const BASE: u64 = 8453;
    pub const ARBITRUM: u64 = 42161;
}

/// Factories deployed at the same address on every chain they support.
#[non_exhaustive]
pub struct FactoryAddress;

impl FactoryAddress {
    pub const UNISWAP_V3: Address = address!("1f98431c8ad98523631ae4a59f267346ea31f984");
    pub const UNISWAP_V3_BASE: Address = address!("33128a8fc17869897dce68ed026d694621f6fdfd");
    pub const PANCAKE_V3: Address = address!("0bfbcf9fa4f9c56b0f40a671ad40e0805a091865");
}

#[non_exhaustive]
pub struct PeripheryAddress;

impl PeripheryAddress {
    pub const UNISWAP_V3_TICK_LENS: Address = address!("bfd8137f7d1516d3ea5ca83523914859ec47f573");
    pub const UNISWAP_V3_TICK_LENS_BASE: Address = address!("0cdee061c75d43c82520ed998c23ac2991c9ac6d");
    pub const PANCAKE_V3_TICK_LENS: Address = address!("9a489505a00ce272eaa5e07dba6491314cae3796");
}

/// SushiSwap V3 factory and TickLens, deployed at different addresses per chain.
#[non_exhaustive]
pub struct SushiSwapV3Address;

impl SushiSwapV3Address {
    pub const FACTORY_ETHEREUM: Address = address!("baceb8ec6b9355dfc0269c18bac9d6e2bdc29c4f");
    pub const TICK_LENS_ETHEREUM: Address = address!("fb70ad5a200d784e7901230e6875d91d5fa6b68c");
    pub const FACTORY_ARBITRUM: Address = address!("1af415a1eba07a4986a52b6f2e7de7003d82231e");
    pub const TICK_LENS_ARBITRUM: Address = address!("8516944e89f296eb6473d79aed1ba12088016c9e");
    pub const FACTORY_POLYGON: Address = address!("917933899c6a5f8e37f31e19f92cdbff7e8ff0e2");
    pub const TICK_LENS_POLYGON: Address = address!("9fdea1412e50d78b25ace4f96d35801647fdf7da");
    pub const FACTORY_OPTIMISM: Address = address!("9c6522117e2ed1fe5bdb72bb0ed5e3f2bde7dbe0");
    pub const TICK_LENS_OPTIMISM: Address = address!("0367a647a68f304f2a6e453c25033a4249d7f2c6");
    pub const FACTORY_BASE: Address = address!("c35dadb65012ec5796536bd9864ed8773abc74c4");
    pub const TICK_LENS_BASE: Address = address!("f4d73326c13a4fc5fd7a064217e12780e9bd62c3");
}

// (chain, factory, tick lens)
const TICK_LENS_BOOK: [(u64, Address, Address); 14] = [
    (ChainId::ETHEREUM, SushiSwapV3Address::FACTORY_ETHEREUM, SushiSwapV3Address::TICK_LENS_ETHEREUM),
    (ChainId::ARBITRUM, SushiSwapV3Address::FACTORY_ARBITRUM, SushiSwapV3Address::TICK_LENS_ARBITRUM),
    (ChainId::POLYGON, SushiSwapV3Address::FACTORY_POLYGON, SushiSwapV3Address::TICK_LENS_POLYGON),
    (ChainId::OPTIMISM, SushiSwapV3Address::FACTORY_OPTIMISM, SushiSwapV3Address::TICK_LENS_OPTIMISM),
    (ChainId::BASE, SushiSwapV3Address::FACTORY_BASE, SushiSwapV3Address::TICK_LENS_BASE),
    (ChainId::ETHEREUM, FactoryAddress::UNISWAP_V3, PeripheryAddress::UNISWAP_V3_TICK_LENS),
    (ChainId::OPTIMISM, FactoryAddress::UNISWAP_V3, PeripheryAddress::UNISWAP_V3_TICK_LENS),
    (ChainId::POLYGON, FactoryAddress::UNISWAP_V3, PeripheryAddress::UNISWAP_V3_TICK_LENS),
    (ChainId::ARBITRUM, FactoryAddress::UNISWAP_V3, PeripheryAddress::UNISWAP_V3_TICK_LENS),
    (ChainId::BASE, FactoryAddress::UNISWAP_V3_BASE, PeripheryAddress::UNISWAP_V3_TICK_LENS_BASE),
    (ChainId::ETHEREUM, FactoryAddress::PANCAKE_V3, PeripheryAddress::PANCAKE_V3_TICK_LENS),
    (ChainId::BSC, FactoryAddress::PANCAKE_V3, PeripheryAddress::PANCAKE_V3_TICK_LENS),
    (ChainId::BASE, FactoryAddress::PANCAKE_V3, PeripheryAddress::PANCAKE_V3_TICK_LENS),
    (ChainId::ARBITRUM, FactoryAddress::PANCAKE_V3, PeripheryAddress::PANCAKE_V3_TICK_LENS),
];

#[non_exhaustive]
pub struct UniswapV3PoolAddress;

impl UniswapV3PoolAddress {
    pub const USDC_USDT_100: Address = address!("3416cf6c708da44db2624d63ea0aaef7113527c6");
    pub const USDC_WETH_500: Address = address!("88e6a0c2ddd26feeb64f039a2c41296fcb3f5640");
    pub const USDC_WETH_3000: Address = address!("8ad599c3a0ff1de082011efddc58f1908eb6e6d8");
    pub const WBTC_USDT_3000: Address = address!("9db9e0e53058c89e5b94e29621a205198648425b");
    pub const WETH_USDT_3000: Address = address!("4e68ccd3e89f51c3074ca5072bbac773960dfa36");
}

#[non_exhaustive]
pub struct PancakeV3PoolAddress;

impl PancakeV3PoolAddress {
    pub const USDC_USDT_100: Address = address!("04c8577958ccc170eb3d2cca76f9d51bc6e42d8f");
}

/// Pool charted when none is given on the command line.
pub const DEFAULT_POOL: Address = UniswapV3PoolAddress::USDC_WETH_500;

/// TickLens deployment serving pools created by `factory` on `chain_id`, if one is known.
pub fn tick_lens_for_factory(chain_id: u64, factory: &Address) -> Option<Address> {
    TICK_LENS_BOOK.iter().find(|(chain, known, _)| *chain == chain_id && known == factory).map(|(_, _, tick_lens)| *tick_lens)
}

/// SushiSwap V3 factory on `chain_id`.
pub fn sushiswap_v3_factory(chain_id: u64) -> Option<Address> {
    match chain_id {
        ChainId::ETHEREUM => Some(SushiSwapV3Address::FACTORY_ETHEREUM),
        ChainId::ARBITRUM => Some(SushiSwapV3Address::FACTORY_ARBITRUM),
        ChainId::POLYGON => Some(SushiSwapV3Address::FACTORY_POLYGON),
        ChainId::OPTIMISM => Some(SushiSwapV3Address::FACTORY_OPTIMISM),
        ChainId::BASE => Some(SushiSwapV3Address::FACTORY_BASE),
        _ => None,
    }
}
