// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 爬虫模块
///
/// 该模块实现爬取引擎的核心：
/// - 边界（frontier）：待处理任务的有序集合
/// - 账本（ledger）：访问集合与页面预算的原子记账
/// - 控制器（controller）：驱动逐URL处理管线的循环
pub mod controller;
pub mod frontier;
pub mod ledger;
