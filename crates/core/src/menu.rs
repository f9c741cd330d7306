//! Side menu navigation entries seeded on first start.

/// A navigation entry before it has been persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSeed {
    pub title: &'static str,
    pub icon: &'static str,
    pub path: &'static str,
}

/// Menu entries inserted when the `menu_items` table is empty, in display order.
pub const DEFAULT_MENU: &[MenuSeed] = &[
    MenuSeed { title: "Dashboard", icon: "dashboard", path: "/" },
    MenuSeed { title: "Leaderboard", icon: "leaderboard", path: "/leaderboard" },
    MenuSeed { title: "Orders", icon: "shopping_cart", path: "/orders" },
    MenuSeed { title: "Products", icon: "inventory", path: "/products" },
    MenuSeed { title: "Sales Report", icon: "assessment", path: "/sales" },
    MenuSeed { title: "Messages", icon: "message", path: "/messages" },
    MenuSeed { title: "Settings", icon: "settings", path: "/settings" },
];
