//! Contract interfaces used by the assistant.
//!
//! Only the functions the assistant calls are declared. Calldata is produced
//! with `SolCall::abi_encode` and results are decoded with
//! `SolCall::abi_decode_returns`.

use alloy::sol;

sol! {
    /// Flare contract registry; resolves the current FTSOv2 deployment.
    interface IFlareContractRegistry {
        function getFtsoV2() external view returns (address);
    }

    /// FTSOv2 block-latency feeds.
    interface IFtsoV2 {
        function getFeedsById(bytes21[] calldata _feedIds)
            external
            view
            returns (uint256[] memory _values, int8[] memory _decimals, uint64 _timestamp);
    }

    interface IERC20 {
        function balanceOf(address _owner) external view returns (uint256 balance);
    }

    /// Trading contract deployed next to the assistant.
    interface IFlareDex {
        function swap(address tokenIn, address tokenOut, uint256 amountIn) external returns (uint256 amountOut);

        function swapWithOneInch(
            address tokenIn,
            address tokenOut,
            uint256 amountIn,
            uint256 minReturn,
            bytes calldata oneInchData
        ) external returns (uint256 amountOut);

        function swapFLRtoWFLR(uint256 amount) external payable;

        function crossChainSwap(
            address tokenIn,
            uint256 amountIn,
            string calldata destinationChain,
            address tokenOut,
            address recipient
        ) external;

        function addLiquidity(address tokenA, address tokenB, uint256 amountA, uint256 amountB) external;
    }
}
