//! # `kanshi-feed` - 行情数据源
//!
//! `kanshi-core` 中 `PriceFeed` 端口的 CoinGecko 实现。

pub mod coingecko;
