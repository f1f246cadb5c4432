//! Definitions of Solidity functions called during deployment

use alloy_sol_types::sol;

sol! {
    function initialize(address summoner, address moduleProxyFactory) external;

    function transferOwnership(address newOwner) external;
}
