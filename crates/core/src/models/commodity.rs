use serde::{Deserialize, Serialize};

/// Market segment a commodity belongs to. Used for grouping and
/// filtering in listings, not for provider routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommodityCategory {
    /// Base and precious metals (gold, silver, copper, ...)
    Metals,
    /// Oil, gas and refined products
    Energy,
    /// Crops and soft commodities
    Agriculture,
    /// Everything else (rubber, mentha oil, palm oil, ...)
    Others,
}

impl std::fmt::Display for CommodityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommodityCategory::Metals => write!(f, "Metals"),
            CommodityCategory::Energy => write!(f, "Energy"),
            CommodityCategory::Agriculture => write!(f, "Agriculture"),
            CommodityCategory::Others => write!(f, "Others"),
        }
    }
}

/// Reference data for one tradable commodity.
///
/// `reference_price`, `high`, `low` and `volume` are static exchange
/// reference levels: they seed offline quotes and anchor the day-change
/// calculation when a live price is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commodity {
    /// Ticker symbol, uppercased (e.g., "GOLD", "CRUDEOIL")
    pub symbol: String,

    /// Human-readable name with contract unit (e.g., "Gold (10g)")
    pub name: String,

    /// Market segment
    pub category: CommodityCategory,

    /// Reference price level
    pub reference_price: f64,

    /// Reference session high
    pub high: f64,

    /// Reference session low
    pub low: f64,

    /// Reference session volume
    pub volume: u64,
}

impl Commodity {
    pub fn new(
        symbol: &str,
        name: &str,
        category: CommodityCategory,
        reference_price: f64,
        high: f64,
        low: f64,
        volume: u64,
    ) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            name: name.to_string(),
            category,
            reference_price,
            high,
            low,
            volume,
        }
    }
}

/// The set of commodities the desk knows about.
///
/// The default catalog mirrors a typical multi-commodity exchange board
/// across the four categories. Lookup is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommodityCatalog {
    commodities: Vec<Commodity>,
}

impl CommodityCatalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self {
            commodities: Vec::new(),
        }
    }

    /// Build a catalog from an explicit commodity list.
    pub fn from_commodities(commodities: Vec<Commodity>) -> Self {
        Self { commodities }
    }

    /// All commodities, catalog order (grouped by category).
    #[must_use]
    pub fn all(&self) -> &[Commodity] {
        &self.commodities
    }

    /// Commodities in one category, catalog order.
    #[must_use]
    pub fn in_category(&self, category: CommodityCategory) -> Vec<&Commodity> {
        self.commodities
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    /// Case-insensitive lookup by symbol.
    #[must_use]
    pub fn find(&self, symbol: &str) -> Option<&Commodity> {
        let upper = symbol.to_uppercase();
        self.commodities.iter().find(|c| c.symbol == upper)
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.find(symbol).is_some()
    }

    /// All symbols, catalog order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        self.commodities.iter().map(|c| c.symbol.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commodities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commodities.is_empty()
    }
}

impl Default for CommodityCatalog {
    fn default() -> Self {
        use CommodityCategory::{Agriculture, Energy, Metals, Others};
        Self::from_commodities(vec![
            // Metals
            Commodity::new("GOLD", "Gold (10g)", Metals, 94_760.0, 96_000.0, 93_500.0, 5_000),
            Commodity::new("SILVER", "Silver (10g)", Metals, 952.0, 970.0, 940.0, 7_500),
            Commodity::new("COPPER", "Copper (kg)", Metals, 906.4, 920.0, 890.0, 3_000),
            Commodity::new("ALUMINIUM", "Aluminium (kg)", Metals, 232.85, 240.0, 225.0, 4_000),
            Commodity::new("LEAD", "Lead (kg)", Metals, 191.85, 200.0, 185.0, 3_500),
            Commodity::new("ZINC", "Zinc (kg)", Metals, 273.95, 285.0, 260.0, 3_600),
            Commodity::new("NICKEL", "Nickel (kg)", Metals, 1_654.3, 1_680.0, 1_630.0, 1_500),
            // Energy
            Commodity::new("CRUDEOIL", "Crude Oil (barrel)", Energy, 5_811.0, 6_122.0, 5_555.0, 24_000),
            Commodity::new("NATURALGAS", "Natural Gas (MMBtu)", Energy, 356.1, 388.0, 322.0, 18_000),
            Commodity::new("BRENT", "Brent Crude (barrel)", Energy, 6_122.0, 6_375.0, 5_800.0, 15_000),
            Commodity::new("HEATINGOIL", "Heating Oil (barrel)", Energy, 2_345.0, 2_400.0, 2_300.0, 9_000),
            // Agriculture
            Commodity::new("COTTON", "Cotton (bale)", Agriculture, 1_795.0, 1_850.0, 1_750.0, 7_000),
            Commodity::new("SOYBEAN", "Soybean (kg)", Agriculture, 6_060.0, 6_200.0, 5_900.0, 6_500),
            Commodity::new("WHEAT", "Wheat (kg)", Agriculture, 2_390.0, 2_450.0, 2_350.0, 6_000),
            Commodity::new("CORN", "Corn (kg)", Agriculture, 1_970.0, 2_050.0, 1_900.0, 8_200),
            Commodity::new("SUGAR", "Sugar (kg)", Agriculture, 3_410.0, 3_550.0, 3_300.0, 9_500),
            // Others
            Commodity::new("RUBBER", "Rubber (kg)", Others, 18_760.0, 19_000.0, 18_500.0, 3_200),
            Commodity::new("MENTHAOIL", "Mentha Oil (kg)", Others, 958.9, 980.0, 930.0, 2_800),
            Commodity::new("CPO", "CPO (kg)", Others, 876.0, 900.0, 850.0, 5_400),
        ])
    }
}
