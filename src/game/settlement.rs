use super::constants::NUM_PLAYERS;
use super::payment::{PaymentLine, PaymentReason};
use super::scoring::Multiplier;
use std::collections::HashMap;

/// 结算结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementResult {
    /// 座位 -> 结算金额（正数表示收入，负数表示支出）；四个座位都有记录
    pub payments: HashMap<u8, i32>,
    /// 每笔付款
    pub breakdown: Vec<PaymentLine>,
    /// 本局倍数
    pub multiplier: Multiplier,
    /// 结算说明
    pub description: String,
}

impl SettlementResult {
    /// 由付款明细生成结算结果，胜者收取全部付款
    pub fn from_lines(winner: u8, breakdown: Vec<PaymentLine>, multiplier: Multiplier) -> Self {
        let mut payments: HashMap<u8, i32> = (0..NUM_PLAYERS).map(|seat| (seat, 0)).collect();
        let mut total = 0;
        for line in &breakdown {
            *payments.entry(line.seat).or_insert(0) -= line.amount;
            total += line.amount;
        }
        *payments.entry(winner).or_insert(0) += total;

        let mut result = Self {
            payments,
            breakdown,
            multiplier,
            description: String::new(),
        };
        result.description = result.describe();
        result
    }

    /// 某个座位的结算金额
    pub fn delta(&self, seat: u8) -> i32 {
        self.payments.get(&seat).copied().unwrap_or(0)
    }

    /// 各家金额之和为零
    pub fn is_zero_sum(&self) -> bool {
        self.payments.values().sum::<i32>() == 0
    }

    /// 把本局结算加到累计分数上
    pub fn apply(&self, totals: &mut [i32; 4]) {
        for (&seat, &amount) in &self.payments {
            if let Some(total) = totals.get_mut(seat as usize) {
                *total += amount;
            }
        }
    }

    /// 中文结算说明
    pub fn describe(&self) -> String {
        let mut desc = String::new();
        if self.multiplier.concealed {
            desc.push_str("门清 x2  ");
        }
        if self.multiplier.closed_wait {
            desc.push_str("夹 x2  ");
        }
        if self.multiplier.value() == 1 {
            desc.push_str("平胡");
        } else {
            desc.push_str(&format!("(总倍数 x{})", self.multiplier.value()));
        }
        desc.push('\n');

        match self.breakdown.first().map(|line| line.reason) {
            Some(PaymentReason::SelfDrawn) => desc.push_str("自摸！\n"),
            Some(PaymentReason::DealIn) => desc.push_str("点炮胡！\n"),
            None => {}
        }
        for line in &self.breakdown {
            desc.push_str(&line.to_string());
            desc.push('\n');
        }
        desc
    }
}
