//! ERC20 contract bindings.

use alloy::sol;

// Metadata subset of the ERC20 interface
sol! {
    #[sol(rpc)]
    interface IERC20 {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
    }
}
