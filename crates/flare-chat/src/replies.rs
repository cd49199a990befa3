//! Canned reply texts.

pub const GREETINGS: [&str; 4] = [
    "Hello there! 👋 I'm your friendly Flare Network trading assistant! Ready to explore some DeFi magic? ✨",
    "Hey! 🌟 Great to see you! I'm here to help you navigate the exciting world of cross-chain trading on Flare Network!",
    "Hi! 😊 Welcome back to your trading companion! What amazing trades shall we execute today?",
    "Greetings, trader! 🚀 I'm pumped to help you make some profitable moves in the crypto markets today!",
];

pub const THANKS: [&str; 4] = [
    "You're absolutely welcome! 😊 Happy to help you succeed in crypto trading! 🎯",
    "Anytime! 🌟 That's what I'm here for: making crypto trading easier and more fun!",
    "My pleasure! 💫 Keep those successful trades coming! 📈",
    "Glad I could help! 🤝 Remember, I'm always here when you need trading assistance!",
];

pub const FALLBACKS: [&str; 5] = [
    "I'd love to help you with that! 😊 Could you be more specific? For example, try asking about token prices, executing trades, or checking your portfolio!",
    "Hmm, I'm not quite sure what you're looking for there! 🤔 I'm great at helping with trading, prices, cross-chain swaps, and portfolio management. What would you like to explore?",
    "That's interesting! 💭 I'm specialized in crypto trading and cross-chain operations. Try asking me about buying tokens, checking prices, or bridging assets between chains!",
    "I want to help! 🌟 I understand trading commands, price queries, portfolio questions, and cross-chain operations. What crypto adventure shall we embark on?",
    "Great question! 🎯 I'm your DeFi trading companion. Ask me about token swaps, cross-chain bridges, gas fees, or anything related to trading on Flare Network and beyond!",
];

pub const EMPTY_PORTFOLIO: &str = "📊 **Your Portfolio**

Your portfolio is currently empty! 💼✨

**Ready to start trading?** Here are some ideas:
• Buy some WFLR to get started
• Try \"buy 100 WFLR\"
• Ask me \"what tokens can I trade?\"

I'm here to help you build an amazing portfolio! 🌟";

pub const SUPPORTED_CHAINS: &str = "🌐 **Supported Networks & Features:**

**🔥 Flare Network** (Primary)
• Native FLR & WFLR tokens
• Ultra-low gas fees ($0.01)
• FTSO price oracles
• ⭐ Best for: All trading activities

**🔗 Cross-Chain Support:**
• **Ethereum** - Premium DeFi hub
• **Polygon** - Fast & cheap L2
• **BSC** - Binance ecosystem
• **Avalanche** - High throughput

**🌉 Bridge Features:**
• LayerZero integration
• 1inch aggregator
• Native Flare bridges
• Real-time fee estimation

Want to try a cross-chain swap? Just say something like \"bridge 100 USDT to Ethereum\"! 🚀";

pub const HELP: &str = "🤖 **Your AI Trading Assistant - Full Capabilities!**

**💰 Basic Trading:**
• `buy 100 WFLR` - Purchase tokens
• `sell 50 ETH` - Sell tokens
• `swap 100 USDT for WFLR` - Token swaps
• `wrap 200 FLR to WFLR` - Wrap/unwrap

**🌉 Cross-Chain Trading:**
• `bridge 50 USDT to Ethereum` - Cross-chain transfers
• `quote 100 FLR to Polygon` - Get bridge quotes
• `swap 10 ETH on Ethereum` - Chain-specific trades

**📊 Information & Analysis:**
• `price of ETH` - Real-time prices
• `balance` - Portfolio overview
• `gas fees on Ethereum` - Fee estimates
• `supported chains` - Available networks

**🤖 I'm Conversational!**
I understand natural language, so you can ask me anything like:
• \"What's the best way to get USDT on Polygon?\"
• \"How much would it cost to bridge 500 WFLR to Ethereum?\"
• \"Show me my portfolio performance\"

**🎯 Pro Tips:**
• I provide real-time quotes with fees
• I suggest optimal routes for trades
• I track your portfolio automatically
• I'm always learning and improving!

Ready to make some profitable trades? 🚀";

pub const FLARE_INFO: &str = "🔥 **Flare Network - The Oracle Blockchain!**

**What makes Flare special:**
• **FTSO Oracles** - Decentralized price feeds without external dependencies
• **Ultra-low fees** - Trade for pennies, not dollars!
• **EVM Compatible** - All your favorite DeFi tools work here
• **State Connectors** - Prove events from other blockchains

**Why Trade on Flare:**
• 📊 **Accurate Prices** - Real-time data from FTSO oracles
• ⚡ **Lightning Fast** - 1-2 second block times
• 💰 **Cost Effective** - $0.01 average transaction cost
• 🌉 **Cross-Chain Ready** - Built for multi-chain DeFi

**Available Assets:**
• FLR (native token) & WFLR (wrapped for DeFi)
• Bridged ETH, USDT, and other major tokens
• Growing ecosystem of native tokens

Ready to experience the future of DeFi on Flare? Let's start trading! 🚀";

pub const MARKET_INFO: &str = "📈 **Crypto Market Insights**

I'm constantly monitoring prices across all supported networks! Here's what I can help you with:

• **Real-time prices** from multiple sources
• **Cross-chain arbitrage** opportunities
• **Gas fee optimization** across networks
• **Portfolio tracking** and performance analysis

**Current Focus Areas:**
• Flare Network native tokens (FLR/WFLR)
• Major DeFi tokens (ETH, USDT, USDC)
• Cross-chain bridge opportunities

Want to see specific market data? Just ask me about any token price or market conditions! 📊✨";

pub const TIPS: &str = "🎯 **Advanced Trading Tips & Strategies**

**🔥 Flare Network Advantages:**
• Use FTSO oracles for the most accurate pricing
• Take advantage of ultra-low fees for frequent trading
• Bridge assets during low-traffic periods for better rates

**💡 Cross-Chain Optimization:**
• **Small trades (<$100):** Use Polygon or BSC for low fees
• **Large trades (>$10k):** Prefer Ethereum for maximum security
• **DeFi activities:** Flare Network for best fee/security balance

**⚡ Gas Fee Strategies:**
• Monitor gas prices and trade during low-traffic hours
• Batch multiple operations when possible
• Use Layer 2 solutions for cost savings

**🎨 Portfolio Tips:**
• Diversify across chains and tokens
• Keep some stablecoins for opportunities
• Use wrapping/unwrapping strategically for DeFi access

**🌉 Bridge Timing:**
• Check multiple routes for best rates
• Consider time vs. cost trade-offs
• Monitor bridge liquidity before large transfers

Want specific advice for your situation? Just tell me about your trading goals! 🚀";

pub const WRAP_PAIR_ONLY: &str = "❌ I can only wrap/unwrap between FLR and WFLR tokens. These are 1:1 conversions that make FLR compatible with DeFi protocols! 🔧";
