pub mod badgekit;
