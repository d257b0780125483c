//! Solidity bindings for the exchange, its protocol managers and the token
//! standards orders are settled in.

mod deployments;
mod macros;

pub use deployments::{Addresses, networks};

crate::bindings!(LooksRareExchange {
    struct MakerOrder {
        bool isOrderAsk;
        address signer;
        address collection;
        uint256 price;
        uint256 tokenId;
        uint256 amount;
        address strategy;
        address currency;
        uint256 nonce;
        uint256 startTime;
        uint256 endTime;
        uint256 minPercentageToAsk;
        bytes params;
        uint8 v;
        bytes32 r;
        bytes32 s;
    }

    struct TakerOrder {
        bool isOrderAsk;
        address taker;
        uint256 price;
        uint256 tokenId;
        uint256 minPercentageToAsk;
        bytes params;
    }

    event CancelAllOrders(address indexed user, uint256 newMinNonce);
    event CancelMultipleOrders(address indexed user, uint256[] orderNonces);

    function DOMAIN_SEPARATOR() external view returns (bytes32);
    function WETH() external view returns (address);
    function currencyManager() external view returns (address);
    function executionManager() external view returns (address);
    function royaltyFeeManager() external view returns (address);
    function transferSelectorNFT() external view returns (address);

    function isUserOrderNonceExecutedOrCancelled(address user, uint256 orderNonce) external view returns (bool);
    function userMinOrderNonce(address user) external view returns (uint256);

    function cancelAllOrdersForSender(uint256 minNonce) external;
    function cancelMultipleMakerOrders(uint256[] calldata orderNonces) external;

    function matchAskWithTakerBidUsingETHAndWETH(TakerOrder calldata takerBid, MakerOrder calldata makerAsk) external payable;
    function matchAskWithTakerBid(TakerOrder calldata takerBid, MakerOrder calldata makerAsk) external;
    function matchBidWithTakerAsk(TakerOrder calldata takerAsk, MakerOrder calldata makerBid) external;
});

crate::bindings!(TransferSelectorNFT {
    function TRANSFER_MANAGER_ERC721() external view returns (address);
    function TRANSFER_MANAGER_ERC1155() external view returns (address);
    function transferManagerSelectorForCollection(address collection) external view returns (address);
    function checkTransferManagerForToken(address collection) external view returns (address transferManager);
});

crate::bindings!(CurrencyManager {
    function isCurrencyWhitelisted(address currency) external view returns (bool);
});

crate::bindings!(ExecutionManager {
    function isStrategyWhitelisted(address strategy) external view returns (bool);
});

crate::bindings!(ExecutionStrategy {
    function viewProtocolFee() external view returns (uint256);
});

crate::bindings!(RoyaltyFeeRegistry {
    function royaltyInfo(address collection, uint256 amount) external view returns (address receiver, uint256 royaltyAmount);
});

crate::bindings!(ERC20 {
    function balanceOf(address account) external view returns (uint256);
    function allowance(address owner, address spender) external view returns (uint256);
    function approve(address spender, uint256 amount) external returns (bool);
});

crate::bindings!(ERC721 {
    function ownerOf(uint256 tokenId) external view returns (address);
    function getApproved(uint256 tokenId) external view returns (address);
    function isApprovedForAll(address owner, address operator) external view returns (bool);
    function setApprovalForAll(address operator, bool approved) external;
});

crate::bindings!(ERC1155 {
    function balanceOf(address account, uint256 id) external view returns (uint256);
    function isApprovedForAll(address account, address operator) external view returns (bool);
    function setApprovalForAll(address operator, bool approved) external;
});

crate::bindings!(ERC165 {
    function supportsInterface(bytes4 interfaceId) external view returns (bool);
});

crate::bindings!(ERC2981 {
    function royaltyInfo(uint256 tokenId, uint256 salePrice) external view returns (address receiver, uint256 royaltyAmount);
});

crate::bindings!(ERC1271 {
    function isValidSignature(bytes32 hash, bytes signature) external view returns (bytes4 magicValue);
});

/// `bytes4(keccak256("royaltyInfo(uint256,uint256)"))`
pub const INTERFACE_ID_ERC2981: [u8; 4] = [0x2a, 0x55, 0x20, 0x5a];

/// `bytes4(keccak256("isValidSignature(bytes32,bytes)"))`
pub const ERC1271_MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];
